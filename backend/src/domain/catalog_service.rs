//! Job and tech-stack dictionary service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Slice};

use crate::domain::ports::{
    CatalogCommand, CatalogQuery, JobRepository, TechStackRepository, map_repository_error,
};
use crate::domain::{Error, Job, JobId, TechStack, TechStackId};

fn normalise_keyword(keyword: Option<String>) -> Option<String> {
    keyword
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty())
}

/// Dictionary service implementing [`CatalogCommand`] and [`CatalogQuery`].
#[derive(Clone)]
pub struct CatalogService<J, S> {
    jobs: Arc<J>,
    tech_stacks: Arc<S>,
}

impl<J, S> CatalogService<J, S> {
    pub fn new(jobs: Arc<J>, tech_stacks: Arc<S>) -> Self {
        Self { jobs, tech_stacks }
    }
}

#[async_trait]
impl<J, S> CatalogCommand for CatalogService<J, S>
where
    J: JobRepository,
    S: TechStackRepository,
{
    async fn create_job(&self, name: String) -> Result<Job, Error> {
        let job = Job::new(JobId::random(), &name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let taken = self
            .jobs
            .exists_by_name(job.name())
            .await
            .map_err(|err| map_repository_error("job", err))?;
        if taken {
            return Err(Error::conflict(format!("job `{}` already exists", job.name())));
        }
        self.jobs
            .insert(&job)
            .await
            .map_err(|err| map_repository_error("job", err))?;
        Ok(job)
    }

    async fn create_tech_stack(&self, name: String) -> Result<TechStack, Error> {
        let tech_stack = TechStack::new(TechStackId::random(), &name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let taken = self
            .tech_stacks
            .exists_by_name(tech_stack.name())
            .await
            .map_err(|err| map_repository_error("tech stack", err))?;
        if taken {
            return Err(Error::conflict(format!(
                "tech stack `{}` already exists",
                tech_stack.name()
            )));
        }
        self.tech_stacks
            .insert(&tech_stack)
            .await
            .map_err(|err| map_repository_error("tech stack", err))?;
        Ok(tech_stack)
    }
}

#[async_trait]
impl<J, S> CatalogQuery for CatalogService<J, S>
where
    J: JobRepository,
    S: TechStackRepository,
{
    async fn search_jobs(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Slice<Job>, Error> {
        let peeked = self
            .jobs
            .search_by_name(normalise_keyword(keyword), page)
            .await
            .map_err(|err| map_repository_error("job", err))?;
        Ok(Slice::from_peeked(peeked, page))
    }

    async fn search_tech_stacks(
        &self,
        keyword: Option<String>,
        page: PageRequest,
    ) -> Result<Slice<TechStack>, Error> {
        let peeked = self
            .tech_stacks
            .search_by_name(normalise_keyword(keyword), page)
            .await
            .map_err(|err| map_repository_error("tech stack", err))?;
        Ok(Slice::from_peeked(peeked, page))
    }
}
