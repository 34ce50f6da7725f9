// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Image load error: {0}")]
    ImageLoad(String), // Opening/decoding the source photo failed
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Render error: {0}")]
    Render(String), // Blur/mask/blend could not run on these buffers
}
