use crate::api::models::Location;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub recorded_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub label: Option<String>,
}

impl LocationRecord {
    pub fn line(&self) -> String {
        let mut line = format!(
            "{}  Latitude: {}, Longitude: {}",
            self.recorded_at.format("%Y-%m-%d %H:%M"),
            self.latitude,
            self.longitude
        );
        if let Some(label) = &self.label {
            line.push_str(&format!(" ({label})"));
        }
        line
    }
}

/// Session log of lookups, alerts and incident reports. In-memory only:
/// nothing survives a restart.
pub struct History {
    conn: Connection,
}

impl History {
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS locations (
                id INTEGER PRIMARY KEY,
                recorded_at TEXT NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                label TEXT
            );
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY,
                recorded_at TEXT NOT NULL,
                delivered INTEGER NOT NULL,
                failed INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS incidents (
                id INTEGER PRIMARY KEY,
                recorded_at TEXT NOT NULL,
                body TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    pub fn record_location(&self, location: &Location) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO locations (recorded_at, latitude, longitude, label) VALUES (?1, ?2, ?3, ?4)",
            params![Utc::now(), location.latitude, location.longitude, location.place()],
        )?;
        Ok(())
    }

    /// Newest first.
    pub fn recent_locations(&self, limit: usize) -> rusqlite::Result<Vec<LocationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT recorded_at, latitude, longitude, label FROM locations ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(LocationRecord {
                recorded_at: row.get(0)?,
                latitude: row.get(1)?,
                longitude: row.get(2)?,
                label: row.get(3)?,
            })
        })?;
        rows.collect()
    }

    pub fn record_alert(&self, delivered: usize, failed: usize) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO alerts (recorded_at, delivered, failed) VALUES (?1, ?2, ?3)",
            params![Utc::now(), delivered as i64, failed as i64],
        )?;
        Ok(())
    }

    pub fn alert_count(&self) -> rusqlite::Result<usize> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM alerts", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn record_incident(&self, body: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO incidents (recorded_at, body) VALUES (?1, ?2)",
            params![Utc::now(), body],
        )?;
        Ok(())
    }

    pub fn incident_count(&self) -> rusqlite::Result<usize> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM incidents", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_come_back_newest_first() {
        let history = History::open_in_memory().unwrap();
        history.record_location(&Location::new(1.0, 2.0)).unwrap();
        let mut pune = Location::new(18.52, 73.85);
        pune.city = Some("Pune".into());
        history.record_location(&pune).unwrap();

        let recent = history.recent_locations(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].latitude, 18.52);
        assert_eq!(recent[0].label.as_deref(), Some("Pune"));
        assert!(recent[0].line().ends_with("Latitude: 18.52, Longitude: 73.85 (Pune)"));
        assert_eq!(recent[1].label, None);

        assert_eq!(history.recent_locations(1).unwrap().len(), 1);
    }

    #[test]
    fn counts_alerts_and_incidents() {
        let history = History::open_in_memory().unwrap();
        assert_eq!(history.alert_count().unwrap(), 0);
        history.record_alert(2, 1).unwrap();
        history.record_incident("Followed near the station").unwrap();
        assert_eq!(history.alert_count().unwrap(), 1);
        assert_eq!(history.incident_count().unwrap(), 1);
    }
}
