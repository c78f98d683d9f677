use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::models::{Address, Contact, Phone};
use crate::repositories::traits::{trim_name, ContactRepository, NAME_PADDING};

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS contacts (
        contact_id    INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name    TEXT NOT NULL,
        middle_name   TEXT,
        last_name     TEXT NOT NULL,
        email_address TEXT,
        birthday      TEXT,
        notes         TEXT,
        image_url     TEXT,
        date_created  TEXT NOT NULL,
        date_modified TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_contacts_name
        ON contacts (last_name COLLATE NOCASE, first_name COLLATE NOCASE);

    CREATE TABLE IF NOT EXISTS phones (
        contact_id   INTEGER NOT NULL REFERENCES contacts (contact_id) ON DELETE CASCADE,
        phone_id     INTEGER NOT NULL,
        phone_number TEXT NOT NULL,
        extension    TEXT,
        phone_type   TEXT NOT NULL,
        PRIMARY KEY (contact_id, phone_id)
    );

    CREATE TABLE IF NOT EXISTS addresses (
        contact_id        INTEGER NOT NULL REFERENCES contacts (contact_id) ON DELETE CASCADE,
        address_id        INTEGER NOT NULL,
        street_address    TEXT NOT NULL,
        secondary_address TEXT,
        city              TEXT NOT NULL,
        state             TEXT NOT NULL,
        postal_code       TEXT NOT NULL,
        country           TEXT,
        address_type      TEXT NOT NULL,
        PRIMARY KEY (contact_id, address_id)
    );
";

const CONTACT_COLUMNS: &str = "contact_id, first_name, middle_name, last_name, email_address, \
     birthday, notes, image_url, date_created, date_modified";

const PHONE_COLUMNS: &str = "contact_id, phone_id, phone_number, extension, phone_type";

const ADDRESS_COLUMNS: &str = "contact_id, address_id, street_address, secondary_address, \
     city, state, postal_code, country, address_type";

/// Contact repository backed by a SQLite database.
///
/// `rusqlite` is synchronous, so every operation runs on tokio's blocking
/// pool with the connection behind a mutex.
#[derive(Clone)]
pub struct SqliteContactRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteContactRepository {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &str) -> StoreResult<Self> {
        debug!("Opening contacts database at: {}", path);
        let repo = Self::init(Connection::open(path)?)?;
        info!("Contacts database ready at {}", path);
        Ok(repo)
    }

    /// Create a repository over a private in-memory database (useful for testing).
    pub fn in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            op(&mut *guard)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }
}

#[async_trait]
impl ContactRepository for SqliteContactRepository {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        self.run(|conn| Ok(select_contacts(conn, "", params![])?)).await
    }

    async fn get(&self, contact_id: i32) -> StoreResult<Option<Contact>> {
        self.run(move |conn| {
            let mut found = select_contacts(conn, "WHERE contact_id = ?1", params![contact_id])?;
            Ok(found.pop())
        })
        .await
    }

    async fn search(&self, first_name: &str, last_name: &str) -> StoreResult<Vec<Contact>> {
        let first_name = trim_name(first_name).to_string();
        let last_name = trim_name(last_name).to_string();
        let padding: String = NAME_PADDING.iter().collect();

        self.run(move |conn| {
            Ok(select_contacts(
                conn,
                "WHERE (?1 = '' OR TRIM(first_name, ?3) = ?1 COLLATE NOCASE) \
                   AND (?2 = '' OR TRIM(last_name, ?3) = ?2 COLLATE NOCASE)",
                params![first_name, last_name, padding],
            )?)
        })
        .await
    }

    async fn save(&self, contact: &Contact) -> StoreResult<Option<Contact>> {
        let contact = contact.clone();
        self.run(move |conn| save_contact(conn, contact)).await
    }

    async fn delete(&self, contact_id: i32) -> StoreResult<bool> {
        self.run(move |conn| {
            let removed = conn.execute(
                "DELETE FROM contacts WHERE contact_id = ?1",
                params![contact_id],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    async fn list_phones(&self, contact_id: i32) -> StoreResult<Vec<Phone>> {
        self.run(move |conn| Ok(select_phones(conn, contact_id)?))
            .await
    }

    async fn get_phone(&self, contact_id: i32, phone_id: i32) -> StoreResult<Option<Phone>> {
        self.run(move |conn| {
            let sql = format!(
                "SELECT {} FROM phones WHERE contact_id = ?1 AND phone_id = ?2",
                PHONE_COLUMNS
            );
            Ok(conn
                .query_row(&sql, params![contact_id, phone_id], phone_from_row)
                .optional()?)
        })
        .await
    }

    async fn list_addresses(&self, contact_id: i32) -> StoreResult<Vec<Address>> {
        self.run(move |conn| Ok(select_addresses(conn, contact_id)?))
            .await
    }

    async fn get_address(
        &self,
        contact_id: i32,
        address_id: i32,
    ) -> StoreResult<Option<Address>> {
        self.run(move |conn| {
            let sql = format!(
                "SELECT {} FROM addresses WHERE contact_id = ?1 AND address_id = ?2",
                ADDRESS_COLUMNS
            );
            Ok(conn
                .query_row(&sql, params![contact_id, address_id], address_from_row)
                .optional()?)
        })
        .await
    }
}

fn save_contact(conn: &mut Connection, mut contact: Contact) -> StoreResult<Option<Contact>> {
    let tx = conn.transaction()?;
    let now = Utc::now();

    if contact.is_new() {
        tx.execute(
            "INSERT INTO contacts (first_name, middle_name, last_name, email_address, birthday,
                                   notes, image_url, date_created, date_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                contact.first_name,
                contact.middle_name,
                contact.last_name,
                contact.email_address,
                contact.birthday,
                contact.notes,
                contact.image_url,
                now,
            ],
        )?;
        contact.contact_id = i32::try_from(tx.last_insert_rowid())
            .map_err(|_| StoreError::Other("contact id out of range".to_string()))?;
        contact.date_created = Some(now);
    } else {
        let created: Option<DateTime<Utc>> = tx
            .query_row(
                "SELECT date_created FROM contacts WHERE contact_id = ?1",
                params![contact.contact_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(created) = created else {
            debug!(contact_id = contact.contact_id, "save target does not exist");
            return Ok(None);
        };

        tx.execute(
            "UPDATE contacts
                SET first_name = ?2, middle_name = ?3, last_name = ?4, email_address = ?5,
                    birthday = ?6, notes = ?7, image_url = ?8, date_modified = ?9
              WHERE contact_id = ?1",
            params![
                contact.contact_id,
                contact.first_name,
                contact.middle_name,
                contact.last_name,
                contact.email_address,
                contact.birthday,
                contact.notes,
                contact.image_url,
                now,
            ],
        )?;
        tx.execute(
            "DELETE FROM phones WHERE contact_id = ?1",
            params![contact.contact_id],
        )?;
        tx.execute(
            "DELETE FROM addresses WHERE contact_id = ?1",
            params![contact.contact_id],
        )?;
        contact.date_created = Some(created);
    }

    contact.date_modified = Some(now);
    contact.bind_children();
    if !contact.assign_child_ids() {
        debug!(contact_id = contact.contact_id, "child ids exhausted");
        return Ok(None);
    }

    for phone in &contact.phones {
        tx.execute(
            "INSERT INTO phones (contact_id, phone_id, phone_number, extension, phone_type)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                phone.contact_id,
                phone.phone_id,
                phone.phone_number,
                phone.extension,
                phone.phone_type.as_str(),
            ],
        )?;
    }

    for address in &contact.addresses {
        tx.execute(
            "INSERT INTO addresses (contact_id, address_id, street_address, secondary_address,
                                    city, state, postal_code, country, address_type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                address.contact_id,
                address.address_id,
                address.street_address,
                address.secondary_address,
                address.city,
                address.state,
                address.postal_code,
                address.country,
                address.address_type.as_str(),
            ],
        )?;
    }

    tx.commit()?;
    Ok(Some(contact))
}

fn select_contacts<P: Params>(
    conn: &Connection,
    filter: &str,
    params: P,
) -> rusqlite::Result<Vec<Contact>> {
    let sql = format!(
        "SELECT {} FROM contacts {} ORDER BY contact_id",
        CONTACT_COLUMNS, filter
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut contacts = stmt
        .query_map(params, contact_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for contact in &mut contacts {
        contact.phones = select_phones(conn, contact.contact_id)?;
        contact.addresses = select_addresses(conn, contact.contact_id)?;
    }

    Ok(contacts)
}

fn select_phones(conn: &Connection, contact_id: i32) -> rusqlite::Result<Vec<Phone>> {
    let sql = format!(
        "SELECT {} FROM phones WHERE contact_id = ?1 ORDER BY phone_id",
        PHONE_COLUMNS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let phones = stmt
        .query_map(params![contact_id], phone_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(phones)
}

fn select_addresses(conn: &Connection, contact_id: i32) -> rusqlite::Result<Vec<Address>> {
    let sql = format!(
        "SELECT {} FROM addresses WHERE contact_id = ?1 ORDER BY address_id",
        ADDRESS_COLUMNS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let addresses = stmt
        .query_map(params![contact_id], address_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(addresses)
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        contact_id: row.get(0)?,
        first_name: row.get(1)?,
        middle_name: row.get(2)?,
        last_name: row.get(3)?,
        email_address: row.get(4)?,
        birthday: row.get(5)?,
        notes: row.get(6)?,
        image_url: row.get(7)?,
        date_created: row.get(8)?,
        date_modified: row.get(9)?,
        phones: Vec::new(),
        addresses: Vec::new(),
    })
}

fn phone_from_row(row: &Row<'_>) -> rusqlite::Result<Phone> {
    Ok(Phone {
        contact_id: row.get(0)?,
        phone_id: row.get(1)?,
        phone_number: row.get(2)?,
        extension: row.get(3)?,
        phone_type: parse_text_column(row, 4)?,
    })
}

fn address_from_row(row: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        contact_id: row.get(0)?,
        address_id: row.get(1)?,
        street_address: row.get(2)?,
        secondary_address: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        postal_code: row.get(6)?,
        country: row.get(7)?,
        address_type: parse_text_column(row, 8)?,
    })
}

/// Read a TEXT column into an enum stored by name.
fn parse_text_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}
