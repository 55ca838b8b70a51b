use super::task::Task;
use super::user::User;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "STATUS", "DATE", "CREATED", "UPDATED"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.status,
                task.date.map(|d| d.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default(),
                task.created_date.format("%Y-%m-%d %H:%M:%S"),
                task.updated_date.format("%Y-%m-%d %H:%M:%S")
            ]);
        }
        table.printstd();
    }

    pub fn users(users: &[User]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "CREATED"]);
        for user in users {
            table.add_row(row![user.id, user.name, user.created_date.format("%Y-%m-%d %H:%M:%S")]);
        }
        table.printstd();
    }
}
