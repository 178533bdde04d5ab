use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::image_pipeline::{
    batch::{BatchNotice, BatchState, CancelFlag, ConversionRequest, NoticeSink, Progress, ProgressSink},
    common::error::{ConversionError, Result},
    conversions::ImageConverter,
    encode::TargetFormat,
};

/// Converts files strictly in order and stops at the first failure.
///
/// Per-item errors never escape: they become the final `Failure` result of
/// the returned [`BatchState`].
pub struct BatchOrchestrator<C: ImageConverter> {
    converter: C,
    cancel: Option<CancelFlag>,
}

impl<C: ImageConverter> BatchOrchestrator<C> {
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            cancel: None,
        }
    }

    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn run<P: AsRef<Path>>(
        &self,
        input_paths: &[P],
        target_format: TargetFormat,
        progress: &mut dyn ProgressSink,
        notices: &mut dyn NoticeSink,
    ) -> BatchState {
        self.drive(input_paths, progress, notices, |path| {
            let request = ConversionRequest::new(path, target_format);
            self.converter.convert_request(&request)
        })
    }

    /// Like [`run`](Self::run) but takes the format by name. An unknown name
    /// fails the first item with an encode error.
    pub fn run_named<P: AsRef<Path>>(
        &self,
        input_paths: &[P],
        format_name: &str,
        progress: &mut dyn ProgressSink,
        notices: &mut dyn NoticeSink,
    ) -> BatchState {
        match format_name.parse::<TargetFormat>() {
            Ok(format) => self.run(input_paths, format, progress, notices),
            Err(_) => {
                warn!(format = format_name, "Unsupported target format requested");
                self.drive(input_paths, progress, notices, |_| {
                    Err(ConversionError::UnsupportedFormat(format_name.to_string()))
                })
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }

    fn drive<P: AsRef<Path>>(
        &self,
        input_paths: &[P],
        progress: &mut dyn ProgressSink,
        notices: &mut dyn NoticeSink,
        mut convert_one: impl FnMut(&Path) -> Result<PathBuf>,
    ) -> BatchState {
        let total = input_paths.len();
        let mut state = BatchState::new(total);

        if total == 0 {
            info!("No input files, nothing to convert");
            send_notice(notices, &BatchNotice::NoInput);
            return state;
        }

        info!(total, "Starting batch conversion");

        for input_path in input_paths {
            let input_path = input_path.as_ref();

            if self.is_cancelled() {
                info!(completed = state.completed(), total, "Batch cancelled");
                state.mark_cancelled();
                send_notice(notices, &BatchNotice::Cancelled {
                    completed: state.completed(),
                    total,
                    outputs: state.outputs().map(Path::to_path_buf).collect(),
                });
                return state;
            }

            let _span = tracing::info_span!("batch_item",
                index = state.completed() + 1,
                total,
                input = %input_path.display()
            ).entered();

            match convert_one(input_path) {
                Ok(output_path) => {
                    state.record_success(input_path, output_path);
                    send_progress(progress, Progress {
                        completed: state.completed(),
                        total,
                    });
                }
                Err(e) => {
                    let kind = e.kind();
                    let message = e.to_string();
                    error!(input = %input_path.display(), ?kind, "Conversion failed: {}", message);
                    state.record_failure(input_path, kind, message.clone());
                    send_notice(notices, &BatchNotice::Failed {
                        input_path: input_path.to_path_buf(),
                        kind,
                        message,
                        outputs: state.outputs().map(Path::to_path_buf).collect(),
                    });
                    return state;
                }
            }
        }

        info!(total, "Batch complete");
        send_notice(notices, &BatchNotice::Completed {
            total,
            outputs: state.outputs().map(Path::to_path_buf).collect(),
        });
        state
    }
}

fn send_progress(sink: &mut dyn ProgressSink, progress: Progress) {
    if let Err(e) = sink.report(progress) {
        warn!("Progress sink failed: {:#}", e);
    }
}

fn send_notice(sink: &mut dyn NoticeSink, notice: &BatchNotice) {
    if let Err(e) = sink.notify(notice) {
        warn!("Notice sink failed: {:#}", e);
    }
}
