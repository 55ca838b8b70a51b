use crate::{
    db::{db::Db, tasks::Tasks, users::Users},
    libs::{config::Config, filter::TaskFilter, messages::Message, service::TaskService, view::View},
    msg_error_anyhow, msg_info,
};
use anyhow::Result;
use clap::Args;
use std::sync::Arc;

/// Shows a user's tasks with the same filters as `GET /tasks`.
#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Owner of the tasks
    #[arg(short, long)]
    user: String,

    /// NEW, IN_PROGRESS or COMPLETE
    #[arg(short, long)]
    status: Option<String>,

    /// Scheduled day, YYYY-MM-DD
    #[arg(short, long)]
    date: Option<String>,
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    let config = Config::read()?.with_env_overrides();
    let db = Db::open(config.database().path)?;

    let user = Users::new(db.clone())
        .get_by_name(&args.user)?
        .ok_or_else(|| msg_error_anyhow!(Message::UserNotFound(args.user.clone())))?;

    let filter = TaskFilter::parse(user.id, args.status.as_deref(), args.date.as_deref())?;
    let tasks = TaskService::new(Arc::new(Tasks::new(db))).find_all(&filter)?;

    if tasks.is_empty() {
        msg_info!(Message::TasksNotFoundForUser(user.name));
    } else {
        View::tasks(&tasks);
    }

    Ok(())
}
