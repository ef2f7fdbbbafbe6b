//! Job and tech-stack dictionaries.

use super::{JobId, TechStackId};

/// Raised when a catalog name is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("catalog entry name must not be empty")]
pub struct EmptyCatalogName;

fn normalise(name: &str) -> Result<String, EmptyCatalogName> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(EmptyCatalogName)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// A job title users recruit for or desire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub(crate) id: JobId,
    pub(crate) name: String,
}

impl Job {
    /// Create a job with a trimmed, non-empty name.
    pub fn new(id: JobId, name: &str) -> Result<Self, EmptyCatalogName> {
        Ok(Self {
            id,
            name: normalise(name)?,
        })
    }

    /// Job identifier.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Trimmed job name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A technology tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechStack {
    pub(crate) id: TechStackId,
    pub(crate) name: String,
}

impl TechStack {
    /// Create a tech stack with a trimmed, non-empty name.
    pub fn new(id: TechStackId, name: &str) -> Result<Self, EmptyCatalogName> {
        Ok(Self {
            id,
            name: normalise(name)?,
        })
    }

    /// Tech stack identifier.
    pub fn id(&self) -> TechStackId {
        self.id
    }

    /// Trimmed tech stack name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn trims_names() {
        let job = Job::new(JobId::random(), "  Backend ").expect("valid name");
        assert_eq!(job.name(), "Backend");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_names(#[case] raw: &str) {
        assert_eq!(TechStack::new(TechStackId::random(), raw), Err(EmptyCatalogName));
    }
}
