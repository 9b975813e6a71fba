use std::fmt;

/// Pages of the backoffice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Register,
    Login,
    /// The authenticated landing page with the project list.
    Home,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Register => "register.html",
            Self::Login => "login.html",
            Self::Home => "home.html",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
