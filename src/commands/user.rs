//! User administration. The API has no sign-up route; users and their bearer
//! tokens are created here.

use crate::{
    db::{db::Db, users::Users},
    libs::{config::Config, messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create a user and print its API token
    Add { name: String },
    /// List all users
    List,
    /// Print the API token of an existing user
    Token { name: String },
}

pub fn cmd(args: UserArgs) -> Result<()> {
    let config = Config::read()?.with_env_overrides();
    let users = Users::new(Db::open(config.database().path)?);

    match args.command {
        UserCommand::Add { name } => {
            if users.get_by_name(&name)?.is_some() {
                msg_bail_anyhow!(Message::UserAlreadyExists(name));
            }
            let user = users.create(&name)?;
            msg_success!(Message::UserCreated(user.name.clone()));
            msg_print!(Message::UserToken(user.name, user.token));
        }
        UserCommand::List => {
            let list = users.list()?;
            if list.is_empty() {
                msg_info!(Message::NoUsersFound);
            } else {
                View::users(&list);
            }
        }
        UserCommand::Token { name } => match users.get_by_name(&name)? {
            Some(user) => msg_print!(Message::UserToken(user.name, user.token)),
            None => msg_bail_anyhow!(Message::UserNotFound(name)),
        },
    }

    Ok(())
}
