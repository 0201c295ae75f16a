use crate::core::{EnrollmentInput, EnrollmentRecord, Repository};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::Utc;
use uuid::Uuid;

/// Storage key for the persisted enrollment collection.
pub const ENROLLMENTS_KEY: &str = "enrollments";

/// Durable CRUD over the ordered enrollment collection.
///
/// Append is a whole-collection read-modify-write; concurrent writers are
/// last-writer-wins, which this store accepts rather than solves.
pub struct EnrollmentStore<R: Repository> {
    repo: R,
}

impl<R: Repository> EnrollmentStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the intake values, constructs a record with a fresh id and
    /// creation timestamp, and persists it at the end of the collection.
    pub async fn append(&self, input: EnrollmentInput) -> Result<EnrollmentRecord> {
        input.validate()?;

        let mut records = self.load().await?;
        let record = EnrollmentRecord {
            id: Uuid::new_v4(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            age: input.age as u8,
            gender: input.gender,
            attachment_name: input.attachment_name,
            created_at: Utc::now(),
            group: None,
        };
        records.push(record.clone());

        let data = serde_json::to_vec(&records)?;
        self.repo.write(ENROLLMENTS_KEY, &data).await?;

        tracing::debug!("appended enrollment {} ({} total)", record.id, records.len());
        Ok(record)
    }

    /// Returns the full collection in insertion order. A missing key is an
    /// empty roster; unreadable stored data fails open to an empty roster.
    pub async fn load(&self) -> Result<Vec<EnrollmentRecord>> {
        let Some(data) = self.repo.read(ENROLLMENTS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice(&data) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!("stored enrollments are unreadable, treating as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Removes the persisted collection entirely (not merely empties it).
    pub async fn clear(&self) -> Result<()> {
        tracing::debug!("clearing all enrollment data");
        self.repo.remove(ENROLLMENTS_KEY).await
    }
}
