use shared::domain::{AdminId, Customer, Project, ProjectId, Task, Team};

#[derive(Debug, Clone)]
struct Scoped<K, T> {
    scope: K,
    items: Vec<T>,
}

/// Last fetched reference lists.
///
/// Customers and teams are global. Projects are scoped to the admin they were
/// fetched for and tasks to their parent project; a lookup with a different
/// scope behaves as a cache miss. Every refresh replaces the whole list.
#[derive(Debug, Default)]
pub struct ReferenceDataCache {
    customers: Option<Vec<Customer>>,
    teams: Option<Vec<Team>>,
    projects: Option<Scoped<AdminId, Project>>,
    tasks: Option<Scoped<ProjectId, Task>>,
}

impl ReferenceDataCache {
    pub fn customers(&self) -> &[Customer] {
        self.customers.as_deref().unwrap_or_default()
    }

    pub fn replace_customers(&mut self, customers: Vec<Customer>) {
        self.customers = Some(customers);
    }

    pub fn teams(&self) -> &[Team] {
        self.teams.as_deref().unwrap_or_default()
    }

    pub fn replace_teams(&mut self, teams: Vec<Team>) {
        self.teams = Some(teams);
    }

    pub fn projects_for(&self, admin_id: AdminId) -> Option<&[Project]> {
        self.projects
            .as_ref()
            .filter(|scoped| scoped.scope == admin_id)
            .map(|scoped| scoped.items.as_slice())
    }

    pub fn project_at(&self, admin_id: AdminId, index: usize) -> Option<&Project> {
        self.projects_for(admin_id)?.get(index)
    }

    /// Tasks belong to a project of the previous list, so they are dropped too.
    pub fn replace_projects(&mut self, admin_id: AdminId, projects: Vec<Project>) {
        self.projects = Some(Scoped {
            scope: admin_id,
            items: projects,
        });
        self.tasks = None;
    }

    pub fn tasks_for(&self, project_id: ProjectId) -> Option<&[Task]> {
        self.tasks
            .as_ref()
            .filter(|scoped| scoped.scope == project_id)
            .map(|scoped| scoped.items.as_slice())
    }

    pub fn replace_tasks(&mut self, project_id: ProjectId, tasks: Vec<Task>) {
        self.tasks = Some(Scoped {
            scope: project_id,
            items: tasks,
        });
    }

    pub fn invalidate_projects(&mut self) {
        self.projects = None;
        self.tasks = None;
    }

    pub fn invalidate_tasks(&mut self) {
        self.tasks = None;
    }

    /// Drops admin-scoped lists that were fetched for anyone but `admin_id`.
    pub fn retain_admin_scope(&mut self, admin_id: AdminId) {
        if self.projects.as_ref().is_some_and(|p| p.scope != admin_id) {
            self.invalidate_projects();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::domain::{CustomerId, TaskId, TaskStatus, TeamId};

    use super::*;

    fn project(id: i64, owner: i64) -> Project {
        Project {
            project_id: ProjectId(id),
            name: format!("project-{id}"),
            expected_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            expected_end_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
            customer: Customer {
                id: CustomerId(3),
                name: "Acme".into(),
            },
            owner_admin_id: AdminId(owner),
        }
    }

    fn task(id: i64, project_id: i64) -> Task {
        Task {
            task_id: TaskId(id),
            name: format!("task-{id}"),
            status: TaskStatus::Pending,
            expected_start_date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
            expected_end_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
            project_id: ProjectId(project_id),
            team_id: TeamId(2),
        }
    }

    #[test]
    fn projects_are_invisible_to_other_admins() {
        let mut cache = ReferenceDataCache::default();
        cache.replace_projects(AdminId(7), vec![project(1, 7)]);

        assert_eq!(cache.projects_for(AdminId(7)).map(<[_]>::len), Some(1));
        assert!(cache.projects_for(AdminId(8)).is_none());
        assert!(cache.project_at(AdminId(8), 0).is_none());
    }

    #[test]
    fn retaining_another_admin_scope_drops_projects_and_tasks() {
        let mut cache = ReferenceDataCache::default();
        cache.replace_projects(AdminId(7), vec![project(1, 7)]);
        cache.replace_tasks(ProjectId(1), vec![task(10, 1)]);

        cache.retain_admin_scope(AdminId(7));
        assert!(cache.tasks_for(ProjectId(1)).is_some());

        cache.retain_admin_scope(AdminId(8));
        assert!(cache.projects_for(AdminId(7)).is_none());
        assert!(cache.tasks_for(ProjectId(1)).is_none());
    }

    #[test]
    fn refreshing_projects_replaces_list_and_drops_tasks() {
        let mut cache = ReferenceDataCache::default();
        cache.replace_projects(AdminId(7), vec![project(1, 7), project(2, 7)]);
        cache.replace_tasks(ProjectId(1), vec![task(10, 1)]);

        cache.replace_projects(AdminId(7), vec![project(2, 7)]);

        let ids: Vec<_> = cache
            .projects_for(AdminId(7))
            .expect("projects")
            .iter()
            .map(|p| p.project_id)
            .collect();
        assert_eq!(ids, vec![ProjectId(2)]);
        assert!(cache.tasks_for(ProjectId(1)).is_none());
    }

    #[test]
    fn tasks_lookup_is_scoped_to_parent_project() {
        let mut cache = ReferenceDataCache::default();
        cache.replace_tasks(ProjectId(1), vec![task(10, 1)]);
        assert!(cache.tasks_for(ProjectId(2)).is_none());

        cache.replace_tasks(ProjectId(2), vec![task(20, 2), task(21, 2)]);
        assert!(cache.tasks_for(ProjectId(1)).is_none());
        assert_eq!(cache.tasks_for(ProjectId(2)).map(<[_]>::len), Some(2));
    }
}
