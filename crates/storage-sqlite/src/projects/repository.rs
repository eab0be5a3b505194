use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::ProjectDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::projects;
use procat_core::errors::Result;
use procat_core::projects::{NewProject, Project, ProjectRepositoryTrait, ProjectStatus};

pub struct ProjectRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProjectRepository { pool, writer }
    }
}

pub(crate) fn to_projects(rows: Vec<ProjectDB>) -> Result<Vec<Project>> {
    rows.into_iter()
        .map(|row| Project::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn get_by_id(&self, project_id: &str) -> Result<Project> {
        let mut conn = get_connection(&self.pool)?;
        let row = projects::table
            .find(project_id)
            .select(ProjectDB::as_select())
            .first::<ProjectDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Project::try_from(row)?)
    }

    fn list(&self, status_filter: Option<&[ProjectStatus]>) -> Result<Vec<Project>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = projects::table
            .select(ProjectDB::as_select())
            .order(projects::name.asc())
            .into_boxed();
        if let Some(statuses) = status_filter {
            let names: Vec<&str> = statuses.iter().map(ProjectStatus::as_str).collect();
            query = query.filter(projects::status.eq_any(names));
        }
        let rows = query.load::<ProjectDB>(&mut conn).map_err(StorageError::from)?;
        to_projects(rows)
    }

    async fn create(&self, new_project: NewProject) -> Result<Project> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let row: ProjectDB = new_project.into();
                let result = diesel::insert_into(projects::table)
                    .values(&row)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Project::try_from(result)?)
            })
            .await
    }

    async fn update(&self, project: Project) -> Result<Project> {
        let row: ProjectDB = project.into();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Project> {
                let result = diesel::update(projects::table.find(row.id.clone()))
                    .set(&row)
                    .returning(ProjectDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Project::try_from(result)?)
            })
            .await
    }
}
