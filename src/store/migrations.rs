use sqlite::State;
use tracing_batteries::prelude::*;

const MIGRATIONS: [Migration; 2] = [
    Migration {
        version: 1,
        query: "CREATE TABLE IF NOT EXISTS posts (
          slug TEXT NOT NULL PRIMARY KEY,
          title TEXT NOT NULL,
          category TEXT NOT NULL DEFAULT '',
          tags TEXT NOT NULL DEFAULT '[]',
          image TEXT NOT NULL DEFAULT '',
          updated_at TEXT NOT NULL
        )",
    },
    Migration {
        version: 2,
        query: "CREATE INDEX IF NOT EXISTS posts_by_category ON posts (category, updated_at)",
    },
];

pub fn run_migrations(connection: &sqlite::Connection) -> Result<(), sqlite::Error> {
    debug!("Preparing to run database schema migrations...");
    ensure_migration_table(connection)?;

    let current_version = get_current_version(connection)?;
    let latest_version = MIGRATIONS.iter().map(|m| m.version).max().unwrap_or_default();
    info!(
        "Database schema is currently v{} (latest: v{})",
        current_version, latest_version
    );

    for migration in MIGRATIONS.iter().filter(|m| m.version > current_version) {
        info!(
            {
                migration.version = migration.version,
                migration.query = &migration.query
            },
            "Applying database schema migration v{}",
            migration.version
        );
        apply_migration(connection, migration)?;
    }

    Ok(())
}

fn ensure_migration_table(connection: &sqlite::Connection) -> Result<(), sqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS migrations (
        version INTEGER PRIMARY KEY,
        query TEXT NOT NULL
    )",
    )
}

fn get_current_version(connection: &sqlite::Connection) -> Result<i64, sqlite::Error> {
    let mut statement =
        connection.prepare("SELECT version FROM migrations ORDER BY version DESC LIMIT 1")?;

    if State::Row == statement.next()? {
        statement.read("version")
    } else {
        Ok(0)
    }
}

// A migration and its bookkeeping row are applied together or not at all.
fn apply_migration(
    connection: &sqlite::Connection,
    migration: &Migration,
) -> Result<(), sqlite::Error> {
    connection.execute("BEGIN")?;

    let result = connection.execute(migration.query).and_then(|_| {
        let mut statement =
            connection.prepare("INSERT INTO migrations (version, query) VALUES (?, ?)")?;
        statement.bind((1, migration.version))?;
        statement.bind((2, migration.query))?;
        statement.next().map(|_| ())
    });

    match result {
        Ok(()) => connection.execute("COMMIT"),
        Err(err) => {
            warn!(
                "Rolling back database schema migration v{}: {}",
                migration.version, err
            );
            connection.execute("ROLLBACK")?;
            Err(err)
        }
    }
}

struct Migration {
    version: i64,
    query: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_repeatable() {
        let connection = sqlite::Connection::open(":memory:").unwrap();

        run_migrations(&connection).expect("the first run should succeed");
        run_migrations(&connection).expect("the second run should be a no-op");

        assert_eq!(
            get_current_version(&connection).unwrap(),
            MIGRATIONS.iter().map(|m| m.version).max().unwrap()
        );
    }
}
