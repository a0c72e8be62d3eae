//! Command handlers: gather arguments, call the core, print results.

use crate::app::{Command, Credentials, ProjectCommand, RegisterArgs};
use crowdfund::{
    login, parse_target, AuthError, NewProject, Project, ProjectError, ProjectField, ProjectPatch,
    ProjectRepository, RegisterUserOptions, Session, Store, UserError, UserRegistry,
    ValidationError,
};
use thiserror::Error;
use tracing::warn;

/// Recoverable failures reported to the user
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid project number {0}. Numbers start at 1")]
    InvalidNumber(usize),
}

/// Both collections, loaded once at start-up
pub struct Context {
    pub users: UserRegistry,
    pub projects: ProjectRepository,
}

impl Context {
    #[must_use]
    pub fn open(store: &Store) -> Self {
        let snapshot = store.load();
        if snapshot.users.is_corrupt() {
            warn!("Users file was unusable; continuing with no users");
        }
        if snapshot.projects.is_corrupt() {
            warn!("Projects file was unusable; continuing with no projects");
        }
        Self {
            users: UserRegistry::from_loaded(store.clone(), snapshot.users),
            projects: ProjectRepository::from_loaded(store.clone(), snapshot.projects),
        }
    }

    fn authenticate(&self, credentials: &Credentials) -> Result<Session, CommandError> {
        Ok(login(&self.users, &credentials.email, &credentials.password)?)
    }
}

pub fn run(ctx: &mut Context, command: Command) -> Result<(), CommandError> {
    match command {
        Command::Register(args) => register(ctx, &args),
        Command::Login(credentials) => {
            let session = ctx.authenticate(&credentials)?;
            println!("Welcome back, {}!", session.user().first_name);
            Ok(())
        }
        Command::Projects(command) => run_project(ctx, command),
    }
}

fn register(ctx: &mut Context, args: &RegisterArgs) -> Result<(), CommandError> {
    if args.password != args.confirm_password {
        return Err(CommandError::PasswordMismatch);
    }
    ctx.users.register(RegisterUserOptions {
        first_name: args.first_name.trim().to_string(),
        last_name: args.last_name.trim().to_string(),
        email: args.email.trim().to_string(),
        password: args.password.trim().to_string(),
        mobile_phone: args.phone.trim().to_string(),
    })?;
    println!("Registration successful! You can now login.");
    Ok(())
}

fn run_project(ctx: &mut Context, command: ProjectCommand) -> Result<(), CommandError> {
    match command {
        ProjectCommand::List => {
            let all: Vec<&Project> = ctx.projects.list_all().iter().collect();
            print_projects(&all, true, "No projects found.");
        }
        ProjectCommand::Mine(credentials) => {
            let session = ctx.authenticate(&credentials)?;
            print_projects(
                &ctx.projects.list_by_owner(session.email()),
                false,
                "You haven't created any projects yet.",
            );
        }
        ProjectCommand::Create {
            credentials,
            title,
            details,
            target,
            start,
            end,
        } => {
            let session = ctx.authenticate(&credentials)?;
            ctx.projects.create(
                &session,
                NewProject {
                    title: title.trim().to_string(),
                    details: details.trim().to_string(),
                    total_target: parse_target(&target)?,
                    start_date: start.trim().to_string(),
                    end_date: end.trim().to_string(),
                },
            )?;
            println!("Project created successfully!");
        }
        ProjectCommand::Edit {
            credentials,
            number,
            title,
            details,
            target,
            start,
            end,
        } => {
            let session = ctx.authenticate(&credentials)?;
            let handle = ctx.projects.select_owned(&session, to_position(number)?)?;
            let mut rejected = Vec::new();
            let total_target = match target
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(parse_target)
            {
                Some(Ok(amount)) => Some(amount),
                Some(Err(e)) => {
                    rejected.push((ProjectField::TotalTarget, e));
                    None
                }
                None => None,
            };
            let outcome = ctx.projects.update(
                &handle,
                ProjectPatch {
                    title,
                    details,
                    total_target,
                    start_date: start,
                    end_date: end,
                },
            )?;
            rejected.extend(outcome.rejected);
            for (field, e) in &rejected {
                eprintln!("Kept current {field}: {e}");
            }
            println!("Project updated successfully!");
        }
        ProjectCommand::Delete {
            credentials,
            number,
        } => {
            let session = ctx.authenticate(&credentials)?;
            let handle = ctx.projects.select_owned(&session, to_position(number)?)?;
            ctx.projects.delete(&handle)?;
            println!("Project deleted successfully!");
        }
        ProjectCommand::Search { date } => {
            let found = ctx.projects.search_by_date(date.trim())?;
            if !found.is_empty() {
                println!("Projects running on {}:", date.trim());
            }
            print_projects(
                &found,
                true,
                &format!("No projects found running on {}.", date.trim()),
            );
        }
    }
    Ok(())
}

/// Menu numbers start at 1
fn to_position(number: usize) -> Result<usize, CommandError> {
    number
        .checked_sub(1)
        .ok_or(CommandError::InvalidNumber(number))
}

fn print_projects(projects: &[&Project], with_owner: bool, empty_message: &str) {
    if projects.is_empty() {
        println!("{empty_message}");
        return;
    }
    for (number, project) in (1_usize..).zip(projects) {
        println!();
        println!("Project {number}:");
        println!("Title: {}", project.title);
        println!("Details: {}", project.details);
        println!("Target: {} EGP", project.total_target);
        println!("Start Date: {}", project.start_date);
        println!("End Date: {}", project.end_date);
        if with_owner {
            println!("Created By: {}", project.owner_email);
        }
    }
}
