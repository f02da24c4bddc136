//! Seed data shared by the test suites

use super::Database;
use rusqlite::params;
use std::sync::Arc;

pub const FIRST_BUILDING_ADDRESS: &str = "1910 S Josephine St\nDenver, CO\n";
pub const FIRST_BUILDING_NAME: &str = "Modera Observatory Park";

/// Number of seeded buildings; the next insert receives id `SEEDED_BUILDINGS + 1`
pub const SEEDED_BUILDINGS: i64 = 240;

/// In-memory database loaded with the standard fixture set
pub fn seeded_db() -> Arc<Database> {
    let db = Database::open_in_memory().unwrap();
    {
        let conn = db.conn();

        conn.execute(
            "INSERT INTO buildings (address, name) VALUES (?, ?)",
            params![FIRST_BUILDING_ADDRESS, FIRST_BUILDING_NAME],
        )
        .unwrap();
        for n in 2..=SEEDED_BUILDINGS {
            conn.execute(
                "INSERT INTO buildings (address, name) VALUES (?, ?)",
                params![format!("{} Larimer St\nDenver, CO\n", n * 10), format!("Building {}", n)],
            )
            .unwrap();
        }

        for name in ["Ada", "Grace", "Linus"] {
            conn.execute("INSERT INTO users (name) VALUES (?)", [name])
                .unwrap();
        }

        // hiking (id 1) has no users, climbing (id 2) has Ada and Linus
        for name in ["hiking", "climbing"] {
            conn.execute("INSERT INTO interests (name) VALUES (?)", [name])
                .unwrap();
        }
        for user_id in [1, 3] {
            conn.execute(
                "INSERT INTO user_interests (interest_id, user_id) VALUES (2, ?)",
                [user_id],
            )
            .unwrap();
        }
    }
    Arc::new(db)
}
