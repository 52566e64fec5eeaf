use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

// Each entry runs as its own statement; prepared statements can't hold more than one.
const SCHEMA: &[&str] = &[
    // Needed for `court_id WITH =` inside the bookings exclusion constraint
    "CREATE EXTENSION IF NOT EXISTS btree_gist",
    r#"
    CREATE TABLE IF NOT EXISTS arenas (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        owner_id UUID NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courts (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        arena_id UUID NULL REFERENCES arenas(id),
        name VARCHAR(255) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS arena_schedules (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        arena_id UUID NOT NULL REFERENCES arenas(id),
        day_of_week SMALLINT NULL,
        specific_date DATE NULL,
        open_time TIME NOT NULL,
        close_time TIME NOT NULL,
        is_closed BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT schedule_key CHECK ((day_of_week IS NULL) <> (specific_date IS NULL)),
        CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL,
        court_id UUID NOT NULL REFERENCES courts(id),
        date DATE NOT NULL,
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        duration_hours DOUBLE PRECISION NOT NULL,
        total_price DOUBLE PRECISION NOT NULL,
        payment_status VARCHAR(16) NOT NULL DEFAULT 'pending',
        payment_method VARCHAR(64) NULL,
        payment_id VARCHAR(255) NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'pending',
        cancelled_at TIMESTAMP WITH TIME ZONE NULL,
        cancelled_by UUID NULL,
        cancellation_reason TEXT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT valid_time_range CHECK (end_time > start_time),
        CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed')),
        CONSTRAINT valid_payment_status CHECK (payment_status IN ('pending', 'paid', 'refunded')),
        CONSTRAINT no_overlapping_bookings EXCLUDE USING gist (
            court_id WITH =,
            tsrange(date + start_time, date + end_time) WITH &&
        ) WHERE (status <> 'cancelled')
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_courts_arena_id ON courts(arena_id)",
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_arena_schedules_weekly
        ON arena_schedules(arena_id, day_of_week) WHERE specific_date IS NULL
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_arena_schedules_specific
        ON arena_schedules(arena_id, specific_date) WHERE specific_date IS NOT NULL
    "#,
    "CREATE INDEX IF NOT EXISTS idx_bookings_court_date ON bookings(court_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_user_id ON bookings(user_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
