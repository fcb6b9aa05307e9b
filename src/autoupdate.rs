mod api_ext;
mod disable_outcome;
mod enable_outcome;
mod job_config_store;
mod launch_agent;
mod lifecycle_state;
mod run_history;
mod run_script;
mod update_outcome;

pub use self::{
    disable_outcome::DisableOutcome,
    enable_outcome::EnableOutcome,
    job_config_store::JobConfigStore,
    launch_agent::{build_descriptor, render_descriptor},
    lifecycle_state::LifecycleState,
    run_history::RunHistory,
    run_script::RunScript,
    update_outcome::UpdateOutcome,
};
