// One error type for the whole app.
// Every variant states *where* things went wrong.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Image load error: {0}")]
    ImageLoad(#[source] image::ImageError),
    #[error("Image save error: {0}")]
    ImageSave(#[source] image::ImageError),
    #[error("Source image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}
