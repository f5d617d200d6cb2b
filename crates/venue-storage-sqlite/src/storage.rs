use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use venue_core::{Comment, CommentId, Event, EventId, Ticket, TicketId, User, UserId};
use venue_storage::{CommentStore, EventStore, TicketStore, UserStore};

pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

const COMMENT_SELECT: &str = "SELECT c.id, c.text, c.rating,
        u.id, u.first_name, u.last_name, u.email, u.password,
        e.id, e.name, e.starts_at, e.address, e.description
 FROM comments c
 JOIN users u ON u.id = c.user_id
 JOIN events e ON e.id = c.event_id";

impl SqliteStorage {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(db_path)
            .with_context(|| format!("open sqlite db {}", db_path.display()))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        // init schema
        let init_sql = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(init_sql)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_comment(r: &Row<'_>) -> rusqlite::Result<Comment> {
        Ok(Comment {
            id: CommentId::new(r.get(0)?),
            text: r.get(1)?,
            rating: r.get(2)?,
            user: Some(User {
                id: UserId::new(r.get(3)?),
                first_name: r.get(4)?,
                last_name: r.get(5)?,
                email: r.get(6)?,
                password: r.get(7)?,
            }),
            event: Some(Event {
                id: EventId::new(r.get(8)?),
                name: r.get(9)?,
                starts_at_unix: r.get(10)?,
                address: r.get(11)?,
                description: r.get(12)?,
            }),
        })
    }

    fn row_to_ticket(r: &Row<'_>) -> rusqlite::Result<Ticket> {
        Ok(Ticket {
            id: TicketId::new(r.get(0)?),
            event_id: EventId::new(r.get(1)?),
            kind: r.get(2)?,
            price: r.get(3)?,
            quantity_available: r.get(4)?,
        })
    }
}

impl CommentStore for SqliteStorage {
    fn save(&self, mut comment: Comment) -> Result<Comment> {
        let user_id = comment
            .user
            .as_ref()
            .map(|u| u.id)
            .ok_or_else(|| anyhow!("comment has no user reference"))?;
        let event_id = comment
            .event
            .as_ref()
            .map(|e| e.id)
            .ok_or_else(|| anyhow!("comment has no event reference"))?;

        let conn = self.conn.lock().unwrap();
        if comment.id.is_unassigned() {
            conn.execute(
                "INSERT INTO comments(text, rating, user_id, event_id) VALUES (?1, ?2, ?3, ?4)",
                params![comment.text, comment.rating, user_id.as_i64(), event_id.as_i64()],
            )?;
            comment.id = CommentId::new(conn.last_insert_rowid());
        } else {
            conn.execute(
                "INSERT INTO comments(id, text, rating, user_id, event_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    comment.id.as_i64(),
                    comment.text,
                    comment.rating,
                    user_id.as_i64(),
                    event_id.as_i64()
                ],
            )?;
        }
        Ok(comment)
    }

    fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!("{} WHERE c.id = ?1", COMMENT_SELECT);
        let found = conn
            .query_row(&sql, params![id.as_i64()], Self::row_to_comment)
            .optional()?;
        Ok(found)
    }

    fn find_by_event(&self, event_id: EventId) -> Result<Vec<Comment>> {
        let conn = self.conn.lock().unwrap();
        let sql = format!("{} WHERE c.event_id = ?1 ORDER BY c.id", COMMENT_SELECT);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![event_id.as_i64()], Self::row_to_comment)?;
        let mut comments = vec![];
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }

    fn update(&self, comment: Comment) -> Result<Comment> {
        {
            let conn = self.conn.lock().unwrap();
            let changed = conn.execute(
                "UPDATE comments SET text=?1, rating=?2 WHERE id=?3",
                params![comment.text, comment.rating, comment.id.as_i64()],
            )?;
            if changed == 0 {
                return Err(anyhow!("comment {} missing on update", comment.id));
            }
        }
        // re-read so the returned record carries the stored user/event rows
        CommentStore::find_by_id(self, comment.id)?
            .ok_or_else(|| anyhow!("comment {} missing after update", comment.id))
    }

    fn delete(&self, id: CommentId) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM comments WHERE id=?1", params![id.as_i64()])?;
        Ok(())
    }
}

impl TicketStore for SqliteStorage {
    fn save(&self, mut ticket: Ticket) -> Result<Ticket> {
        let conn = self.conn.lock().unwrap();
        if ticket.id.is_unassigned() {
            conn.execute(
                "INSERT INTO tickets(event_id, kind, price, quantity_available) VALUES (?1, ?2, ?3, ?4)",
                params![
                    ticket.event_id.as_i64(),
                    ticket.kind,
                    ticket.price,
                    ticket.quantity_available
                ],
            )?;
            ticket.id = TicketId::new(conn.last_insert_rowid());
        } else {
            conn.execute(
                "INSERT INTO tickets(id, event_id, kind, price, quantity_available) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    ticket.id.as_i64(),
                    ticket.event_id.as_i64(),
                    ticket.kind,
                    ticket.price,
                    ticket.quantity_available
                ],
            )?;
        }
        Ok(ticket)
    }

    fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        let conn = self.conn.lock().unwrap();
        let found = conn
            .query_row(
                "SELECT id, event_id, kind, price, quantity_available FROM tickets WHERE id=?1",
                params![id.as_i64()],
                Self::row_to_ticket,
            )
            .optional()?;
        Ok(found)
    }

    fn find_all(&self) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, event_id, kind, price, quantity_available FROM tickets ORDER BY id",
        )?;
        let rows = stmt.query_map([], Self::row_to_ticket)?;
        let mut tickets = vec![];
        for row in rows {
            tickets.push(row?);
        }
        Ok(tickets)
    }

    fn find_by_event(&self, event_id: EventId) -> Result<Vec<Ticket>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, event_id, kind, price, quantity_available FROM tickets WHERE event_id=?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![event_id.as_i64()], Self::row_to_ticket)?;
        let mut tickets = vec![];
        for row in rows {
            tickets.push(row?);
        }
        Ok(tickets)
    }

    fn update(&self, ticket: Ticket) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE tickets SET event_id=?1, kind=?2, price=?3, quantity_available=?4 WHERE id=?5",
            params![
                ticket.event_id.as_i64(),
                ticket.kind,
                ticket.price,
                ticket.quantity_available,
                ticket.id.as_i64()
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: TicketId) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM tickets WHERE id=?1", params![id.as_i64()])?;
        Ok(())
    }
}

impl EventStore for SqliteStorage {
    fn save(&self, mut event: Event) -> Result<Event> {
        let conn = self.conn.lock().unwrap();
        if event.id.is_unassigned() {
            conn.execute(
                "INSERT INTO events(name, starts_at, address, description) VALUES (?1, ?2, ?3, ?4)",
                params![event.name, event.starts_at_unix, event.address, event.description],
            )?;
            event.id = EventId::new(conn.last_insert_rowid());
        } else {
            conn.execute(
                "INSERT INTO events(id, name, starts_at, address, description) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    event.id.as_i64(),
                    event.name,
                    event.starts_at_unix,
                    event.address,
                    event.description
                ],
            )?;
        }
        Ok(event)
    }

    fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let conn = self.conn.lock().unwrap();
        let found = conn
            .query_row(
                "SELECT id, name, starts_at, address, description FROM events WHERE id=?1",
                params![id.as_i64()],
                |r| {
                    Ok(Event {
                        id: EventId::new(r.get(0)?),
                        name: r.get(1)?,
                        starts_at_unix: r.get(2)?,
                        address: r.get(3)?,
                        description: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    fn find_all(&self) -> Result<Vec<Event>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, starts_at, address, description FROM events ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Event {
                id: EventId::new(r.get(0)?),
                name: r.get(1)?,
                starts_at_unix: r.get(2)?,
                address: r.get(3)?,
                description: r.get(4)?,
            })
        })?;
        let mut events = vec![];
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }
}

impl UserStore for SqliteStorage {
    fn save(&self, mut user: User) -> Result<User> {
        let conn = self.conn.lock().unwrap();
        if user.id.is_unassigned() {
            conn.execute(
                "INSERT INTO users(first_name, last_name, email, password) VALUES (?1, ?2, ?3, ?4)",
                params![user.first_name, user.last_name, user.email, user.password],
            )?;
            user.id = UserId::new(conn.last_insert_rowid());
        } else {
            conn.execute(
                "INSERT INTO users(id, first_name, last_name, email, password) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.as_i64(),
                    user.first_name,
                    user.last_name,
                    user.email,
                    user.password
                ],
            )?;
        }
        Ok(user)
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let found = conn
            .query_row(
                "SELECT id, first_name, last_name, email, password FROM users WHERE id=?1",
                params![id.as_i64()],
                |r| {
                    Ok(User {
                        id: UserId::new(r.get(0)?),
                        first_name: r.get(1)?,
                        last_name: r.get(2)?,
                        email: r.get(3)?,
                        password: r.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }
}
