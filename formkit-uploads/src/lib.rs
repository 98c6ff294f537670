//! Private upload lifecycle for formkit.
//!
//! Answers "where do uploaded files live, how are they isolated per
//! submission, and when are they purged?" Uploads flagged private are
//! redirected into a per-(field, form) secret directory named by a salted
//! one-way hash; cleanup converges from three triggers (form completion,
//! mail settlement, fallback timer) onto one idempotent purge.

mod config;
mod error;
mod host;
mod manager;
mod media;
mod scheduler;
mod secret;

pub use config::UploadConfig;
pub use error::UploadError;
pub use host::{FsUploadHost, RawFile, StoredFile, TransferPolicy, UploadHost, UploadLocation};
pub use manager::{UploadManager, UploadOptions};
pub use media::{MediaId, MediaItem, MediaLibrary};
pub use scheduler::{PurgeJob, Scheduler, TokioScheduler};
pub use secret::secret_dir_name;
