use crate::{
    config::Config,
    host::{Host, JobScheduler, PackageManager},
};
use handlebars::Handlebars;

pub struct Api<JS: JobScheduler, PM: PackageManager> {
    pub config: Config,
    pub host: Host<JS, PM>,
    pub templates: Handlebars<'static>,
}

impl<JS: JobScheduler, PM: PackageManager> Api<JS, PM> {
    /// Instantiates APIs collection with the specified config and host collaborators.
    pub fn new(config: Config, host: Host<JS, PM>, templates: Handlebars<'static>) -> Self {
        Self {
            config,
            host,
            templates,
        }
    }
}
