use hanu_persist::UserActivity;

/// Privileged acting-context for support staff.
///
/// Impersonation never changes who authenticated; it only redirects whose
/// thread/task/resource data is read and written. Privilege comes from a
/// static allow-list of user ids fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct AdminImpersonation {
    allow_list: Vec<String>,
    target: Option<String>,
}

impl AdminImpersonation {
    pub fn new(allow_list: Vec<String>) -> Self {
        Self {
            allow_list,
            target: None,
        }
    }

    /// Parse a comma-separated allow-list, as configured in the environment.
    pub fn from_list(raw: &str) -> Self {
        let allow_list = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self::new(allow_list)
    }

    pub fn is_privileged(&self, user_id: &str) -> bool {
        self.allow_list.iter().any(|id| id == user_id)
    }

    pub fn select_target(&mut self, target: impl Into<String>) {
        self.target = Some(target.into());
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Resolve whose data operations act on: the selected target when the
    /// caller is privileged, otherwise the caller themself.
    pub fn acting_user<'a>(&'a self, caller: &'a str) -> &'a str {
        match &self.target {
            Some(target) if self.is_privileged(caller) => target,
            _ => caller,
        }
    }
}

/// Case-insensitive substring filter for the admin user picker.
pub fn filter_activity<'a>(activity: &'a [UserActivity], query: &str) -> Vec<&'a UserActivity> {
    let query = query.to_lowercase();
    activity
        .iter()
        .filter(|a| a.user_id.to_lowercase().contains(&query))
        .collect()
}
