use std::sync::Arc;

use tokio::sync::watch;

/// Where the client should be showing the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Login => "/login",
        }
    }
}

/// Shared handle to the current route.
///
/// The HTTP client forces `Login` on a 401; everything else only reads it.
#[derive(Debug, Clone)]
pub struct Navigator {
    route: Arc<watch::Sender<Route>>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (route, _) = watch::channel(initial);

        Self {
            route: Arc::new(route),
        }
    }

    pub fn navigate(&self, to: Route) {
        let from = self.route.send_replace(to);

        if from != to {
            log::debug!("Navigating from {} to {}", from.path(), to.path());
        }
    }

    pub fn current(&self) -> Route {
        *self.route.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }
}
