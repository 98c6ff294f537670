//! Private upload lifecycle manager.
//!
//! Decides whether an upload must be isolated into a per-(field, form)
//! secret directory, redirects the destination for exactly that call, and
//! guarantees the directory does not outlive its need: cleanup runs on
//! form completion, after mail delivery settles, or via the fallback
//! timer, whichever comes first. All three paths converge on one
//! idempotent purge.

use crate::config::UploadConfig;
use crate::error::UploadError;
use crate::host::{RawFile, StoredFile, TransferPolicy, UploadHost};
use crate::media::{MediaItem, MediaLibrary};
use crate::scheduler::{PurgeJob, Scheduler};
use crate::secret::secret_dir_name;
use formkit_types::{FieldId, FormConfig, FormId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Placement arguments for one upload call.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub private: bool,
    pub field_id: Option<String>,
    pub form_id: Option<String>,
}

impl UploadOptions {
    /// Options for a private upload bound to a field/form pair.
    pub fn private(field_id: impl Into<String>, form_id: impl Into<String>) -> Self {
        Self {
            private: true,
            field_id: Some(field_id.into()),
            form_id: Some(form_id.into()),
        }
    }
}

/// Manages upload isolation and the cleanup lifecycle.
pub struct UploadManager {
    config: UploadConfig,
    host: Arc<dyn UploadHost>,
    scheduler: Arc<dyn Scheduler>,
    media: Mutex<MediaLibrary>,
    /// Forms whose cleanup is parked until mail delivery settles.
    deferred: Mutex<HashSet<FormId>>,
}

impl UploadManager {
    pub fn new(
        config: UploadConfig,
        host: Arc<dyn UploadHost>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            config,
            host,
            scheduler,
            media: Mutex::new(MediaLibrary::new()),
            deferred: Mutex::new(HashSet::new()),
        }
    }

    // ================================================================
    // Upload
    // ================================================================

    /// Uploads a file, isolating it into the pair's secret directory when
    /// the options request privacy with both identifiers present.
    ///
    /// The redirected destination is a value local to this call; the host
    /// transfer failing cannot leave isolation state behind for the next
    /// upload to trip over.
    pub fn upload(&self, file: &RawFile, options: &UploadOptions) -> Result<StoredFile, UploadError> {
        // This component owns validation policy for form uploads
        let policy = TransferPolicy {
            validate_form: false,
        };

        let destination = match self.resolve_private(options) {
            Some((field_id, form_id)) => {
                let name = secret_dir_name(&field_id, &form_id, &self.config.server_secret);
                debug!(field_id = %field_id, form_id = %form_id, "isolating upload into secret dir");
                // Schedule before the transfer so a failed transfer still
                // gets its directory purged eventually.
                self.scheduler.schedule(
                    self.config.fallback_delay(),
                    PurgeJob { field_id, form_id },
                );
                self.host.base_location().with_subdir(&name)
            }
            None => self.host.base_location().with_subdir(&date_subdir()),
        };

        self.host.transfer(file, &policy, &destination)
    }

    /// Resolves the privacy invariant: private only when requested and
    /// both identifiers are present and non-empty. Anything else falls
    /// through to the normal public path.
    fn resolve_private(&self, options: &UploadOptions) -> Option<(FieldId, FormId)> {
        if !options.private {
            return None;
        }
        let field_id = FieldId::new(options.field_id.clone()?).ok()?;
        let form_id = FormId::new(options.form_id.clone()?).ok()?;
        Some((field_id, form_id))
    }

    /// Promotes a completed non-private upload into the permanent asset
    /// store, deriving the display title from the filename.
    pub fn add_to_media_library(&self, stored: &StoredFile) -> MediaItem {
        let item = self.media.lock().expect("media library poisoned").add(stored);
        info!(media_id = %item.id, title = %item.title, "upload added to media library");
        item
    }

    /// Snapshot of the media library contents.
    pub fn media_items(&self) -> Vec<MediaItem> {
        self.media
            .lock()
            .expect("media library poisoned")
            .items()
            .to_vec()
    }

    // ================================================================
    // Cleanup
    // ================================================================

    /// Purges the secret directories of every isolating field on `form`.
    ///
    /// When the form sends mail on submission and this is the first run,
    /// cleanup is deferred instead: the form is parked until
    /// [`on_mail_complete`](Self::on_mail_complete) or
    /// [`on_mail_failed`](Self::on_mail_failed) re-enters with
    /// `second_run` set, so files the mailer still needs to attach are
    /// not deleted underneath it.
    pub fn cleanup(&self, form: &FormConfig, second_run: bool) -> Result<(), UploadError> {
        if !second_run && form.sends_mail() {
            info!(form_id = %form.id, "cleanup deferred until mail delivery settles");
            self.deferred
                .lock()
                .expect("deferred set poisoned")
                .insert(form.id.clone());
            return Ok(());
        }

        for type_key in &self.config.private_field_types {
            for field in form.fields_of_type(type_key) {
                self.purge(&field.id, &form.id)?;
            }
        }
        Ok(())
    }

    /// Mail delivery finished; run the parked cleanup for this form.
    pub fn on_mail_complete(&self, form: &FormConfig) -> Result<(), UploadError> {
        self.finish_deferred(form)
    }

    /// Mail delivery failed; the files are no longer needed either way.
    pub fn on_mail_failed(&self, form: &FormConfig) -> Result<(), UploadError> {
        self.finish_deferred(form)
    }

    fn finish_deferred(&self, form: &FormConfig) -> Result<(), UploadError> {
        let was_deferred = self
            .deferred
            .lock()
            .expect("deferred set poisoned")
            .remove(&form.id);
        if !was_deferred {
            // Both mail events may fire for one delivery; the second
            // arrival finds nothing parked.
            return Ok(());
        }
        self.cleanup(form, true)
    }

    /// Whether cleanup for a form is parked awaiting a mail event.
    pub fn has_deferred_cleanup(&self, form_id: &FormId) -> bool {
        self.deferred
            .lock()
            .expect("deferred set poisoned")
            .contains(form_id)
    }

    /// Fallback path, invoked by the scheduled timer. Unconditionally
    /// purges the pair's secret directory; the safety net for submissions
    /// that never reach the completion event.
    pub fn cleanup_via_cron(&self, job: &PurgeJob) -> Result<(), UploadError> {
        self.purge(&job.field_id, &job.form_id)
    }

    /// Deletes the pair's secret directory: contained files first (one
    /// level, non-recursive), then the directory. A missing directory is
    /// a no-op, so racing triggers are harmless.
    fn purge(&self, field_id: &FieldId, form_id: &FormId) -> Result<(), UploadError> {
        let name = secret_dir_name(field_id, form_id, &self.config.server_secret);
        let dir = self.host.base_location().with_subdir(&name).dir();

        if !dir.is_dir() {
            debug!(field_id = %field_id, form_id = %form_id, "secret dir already gone");
            return Ok(());
        }

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                std::fs::remove_file(entry.path())?;
            } else {
                warn!(path = %entry.path().display(), "unexpected non-file in secret dir");
            }
        }
        std::fs::remove_dir(&dir)?;
        info!(field_id = %field_id, form_id = %form_id, "secret dir purged");
        Ok(())
    }
}

/// Default public upload subdirectory, grouped by year and month.
fn date_subdir() -> String {
    chrono::Utc::now().format("%Y/%m").to_string()
}
