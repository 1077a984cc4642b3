use std::path::PathBuf;
use std::sync::Arc;

use crate::database::Database;

pub struct AppState {
    pub db: Arc<Database>,
    /// Root directory the media routes serve article and slider images from.
    pub media_root: PathBuf,
}
