//! Helpers shared by the integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_library::db::{DbPool, establish_connection_pool};
use pushkind_library::domain::book::NewBook;
use pushkind_library::repository::{BookWriter, DieselRepository};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Seeds a small catalog and returns the repository over it.
#[allow(dead_code)]
pub fn seeded(test_db: &TestDb) -> DieselRepository {
    let repo = test_db.repository();
    let books = [
        NewBook::new(
            "Dune",
            Some("Frank Herbert".into()),
            Some("Desert planet politics and spice.".into()),
            "pdfs/dune.pdf",
            Some("images/dune.jpg".into()),
        ),
        NewBook::new(
            "Emma",
            Some("Jane Austen".into()),
            Some("A comedy of manners.".into()),
            "pdfs/emma.pdf",
            None,
        ),
        NewBook::new(
            "Anathem",
            Some("Neal Stephenson".into()),
            Some("Monks of science behind concent walls.".into()),
            "pdfs/anathem.pdf",
            None,
        ),
        NewBook::new(
            "Children of Dune",
            Some("Frank Herbert".into()),
            None,
            "pdfs/children-of-dune.pdf",
            None,
        ),
        NewBook::new("Beowulf", None, Some("Old English epic.".into()), "pdfs/beowulf.pdf", None),
    ];
    assert_eq!(repo.create_books(&books).expect("seed books"), books.len());
    repo
}
