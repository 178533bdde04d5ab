use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::heic::types::DecodedImage;

pub trait HeicReader {
    fn read_heic(&self, data: &[u8]) -> Result<DecodedImage>;
}
