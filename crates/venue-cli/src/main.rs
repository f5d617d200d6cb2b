mod app;
mod config;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use venue_core::{Comment, CommentId, Event, EventId, Ticket, TicketId, User, UserId};
use venue_storage::{EventStore, UserStore};

use crate::app::App;

#[derive(Parser)]
#[command(name = "venue", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize storage in the current directory (creates .venue/, config, db)
    Init,

    /// Show a basic snapshot of events, comments, and tickets
    Status,

    /// Register a user account (seed data for the moderation flows)
    UserAdd {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Register an event (seed data for the moderation flows)
    EventAdd {
        #[arg(long)]
        name: String,
        /// Start time as unix seconds
        #[arg(long)]
        starts_at: i64,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Post a comment on an event
    CommentAdd {
        #[arg(long)]
        event: i64,
        #[arg(long)]
        user: i64,
        #[arg(long)]
        text: String,
        #[arg(long)]
        rating: i32,
    },

    /// List the comments for an event
    CommentList {
        #[arg(long)]
        event: i64,
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Rewrite a comment's text and rating (author only)
    CommentUpdate {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        event: i64,
        #[arg(long)]
        user: i64,
        #[arg(long)]
        text: String,
        #[arg(long)]
        rating: i32,
    },

    /// Remove a comment (author only)
    CommentDelete {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        user: i64,
    },

    /// Put a ticket class on sale for an event
    TicketAdd {
        #[arg(long)]
        event: i64,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: i64,
    },

    /// List tickets, optionally restricted to one event
    TicketList {
        #[arg(long)]
        event: Option<i64>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Rewrite a ticket class
    TicketUpdate {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        event: i64,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: i64,
    },

    /// Withdraw a ticket class
    TicketDelete {
        #[arg(long)]
        id: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            App::init(&root)?;
            println!("Initialized venue storage in {}", root.display());
        }
        Command::Status => {
            let app = App::open(root)?;
            let events = EventStore::find_all(app.store.as_ref())?;
            println!("Events: {}", events.len());
            for event in &events {
                let comments = app.comments.list(event.id)?;
                let tickets = app.tickets.find_by_event(event.id)?;
                println!(
                    "- {} {} ({} comments, {} ticket classes)",
                    event.id, event.name, comments.len(), tickets.len()
                );
            }
        }
        Command::UserAdd {
            first_name,
            last_name,
            email,
            password,
        } => {
            let app = App::open(root)?;
            let user = UserStore::save(
                app.store.as_ref(),
                User::new(first_name, last_name, email, password),
            )?;
            println!("Added user {}", user.id);
        }
        Command::EventAdd {
            name,
            starts_at,
            address,
            description,
        } => {
            let app = App::open(root)?;
            let event = EventStore::save(
                app.store.as_ref(),
                Event::new(name, starts_at, address, description),
            )?;
            println!("Added event {}", event.id);
        }
        Command::CommentAdd {
            event,
            user,
            text,
            rating,
        } => {
            let app = App::open(root)?;
            let mut draft = Comment::new(text, rating);
            draft.user = Some(load_user(&app, user)?);
            draft.event = Some(load_event(&app, event)?);
            let stored = app.comments.create(draft)?;
            println!("Added comment {}", stored.id);
        }
        Command::CommentList { event, json } => {
            let app = App::open(root)?;
            let comments = app.comments.list(EventId::new(event))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comments)?);
            } else {
                for c in comments {
                    let author = c
                        .user
                        .as_ref()
                        .map(|u| format!("{} {}", u.first_name, u.last_name))
                        .unwrap_or_default();
                    println!("- {} [{}/10] {} by {}", c.id, c.rating, c.text, author);
                }
            }
        }
        Command::CommentUpdate {
            id,
            event,
            user,
            text,
            rating,
        } => {
            let app = App::open(root)?;
            let mut draft = Comment::new(text, rating);
            draft.id = CommentId::new(id);
            draft.user = Some(load_user(&app, user)?);
            draft.event = Some(load_event(&app, event)?);
            let updated = app.comments.update(draft)?;
            println!("Updated comment {}", updated.id);
        }
        Command::CommentDelete { id, user } => {
            let app = App::open(root)?;
            app.comments.delete(CommentId::new(id), UserId::new(user))?;
            println!("Deleted comment {}", id);
        }
        Command::TicketAdd {
            event,
            kind,
            price,
            quantity,
        } => {
            let app = App::open(root)?;
            load_event(&app, event)?;
            let stored = app
                .tickets
                .create(Ticket::new(EventId::new(event), kind, price, quantity))?;
            println!("Added ticket {}", stored.id);
        }
        Command::TicketList { event, json } => {
            let app = App::open(root)?;
            let tickets = match event {
                Some(event) => app.tickets.find_by_event(EventId::new(event))?,
                None => app.tickets.find_all()?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
            } else {
                for t in tickets {
                    println!(
                        "- {} event={} {} {:.2} x{}",
                        t.id,
                        t.event_id,
                        t.kind.as_deref().unwrap_or("-"),
                        t.price,
                        t.quantity_available
                    );
                }
            }
        }
        Command::TicketUpdate {
            id,
            event,
            kind,
            price,
            quantity,
        } => {
            let app = App::open(root)?;
            let mut draft = Ticket::new(EventId::new(event), kind, price, quantity);
            draft.id = TicketId::new(id);
            app.tickets.update(draft)?;
            println!("Updated ticket {}", id);
        }
        Command::TicketDelete { id } => {
            let app = App::open(root)?;
            app.tickets.delete(TicketId::new(id))?;
            println!("Deleted ticket {}", id);
        }
    }

    Ok(())
}

fn load_user(app: &App, id: i64) -> Result<User> {
    UserStore::find_by_id(app.store.as_ref(), UserId::new(id))?
        .ok_or_else(|| anyhow!("user {} not found", id))
}

fn load_event(app: &App, id: i64) -> Result<Event> {
    EventStore::find_by_id(app.store.as_ref(), EventId::new(id))?
        .ok_or_else(|| anyhow!("event {} not found", id))
}
