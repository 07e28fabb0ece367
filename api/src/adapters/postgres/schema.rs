//! Schema bootstrap
//!
//! Idempotent DDL applied at startup when `RUN_MIGRATIONS` is enabled.
//! Reference data (recipe and nutrient types) is loaded by operators, not by the API.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

/// Name of the unique index guarding one vote per source IP per recipe
pub const RATING_UNIQUE_INDEX: &str = "ratings_recipe_ip_key";

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS recipe_types (
    id          SERIAL PRIMARY KEY,
    name        VARCHAR(255) NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS nutrient_types (
    id   SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    unit VARCHAR(50)  NOT NULL
);

CREATE TABLE IF NOT EXISTS recipes (
    id             SERIAL PRIMARY KEY,
    title          VARCHAR(255) NOT NULL,
    diners         INTEGER      NOT NULL CHECK (diners > 0),
    description    TEXT,
    recipe_type_id INTEGER      NOT NULL REFERENCES recipe_types (id) ON DELETE RESTRICT,
    created_at     TIMESTAMPTZ  NOT NULL DEFAULT now(),
    deleted_at     TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS recipes_active_type_idx
    ON recipes (recipe_type_id) WHERE deleted_at IS NULL;

CREATE TABLE IF NOT EXISTS ingredients (
    id        SERIAL PRIMARY KEY,
    recipe_id INTEGER          NOT NULL REFERENCES recipes (id) ON DELETE CASCADE,
    position  INTEGER          NOT NULL,
    name      VARCHAR(255)     NOT NULL,
    quantity  DOUBLE PRECISION NOT NULL,
    unit      VARCHAR(50)      NOT NULL
);

CREATE INDEX IF NOT EXISTS ingredients_recipe_idx ON ingredients (recipe_id, position);

CREATE TABLE IF NOT EXISTS steps (
    id          SERIAL PRIMARY KEY,
    recipe_id   INTEGER NOT NULL REFERENCES recipes (id) ON DELETE CASCADE,
    position    INTEGER NOT NULL,
    step_order  INTEGER NOT NULL,
    description TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS steps_recipe_idx ON steps (recipe_id, position);

CREATE TABLE IF NOT EXISTS recipe_nutrients (
    id               SERIAL PRIMARY KEY,
    recipe_id        INTEGER          NOT NULL REFERENCES recipes (id) ON DELETE CASCADE,
    nutrient_type_id INTEGER          NOT NULL REFERENCES nutrient_types (id) ON DELETE RESTRICT,
    position         INTEGER          NOT NULL,
    quantity         DOUBLE PRECISION NOT NULL
);

CREATE INDEX IF NOT EXISTS recipe_nutrients_recipe_idx ON recipe_nutrients (recipe_id, position);

CREATE TABLE IF NOT EXISTS ratings (
    id         SERIAL PRIMARY KEY,
    recipe_id  INTEGER     NOT NULL REFERENCES recipes (id) ON DELETE CASCADE,
    score      INTEGER     NOT NULL CHECK (score BETWEEN 0 AND 5),
    source_ip  VARCHAR(45) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE UNIQUE INDEX IF NOT EXISTS ratings_recipe_ip_key ON ratings (recipe_id, source_ip);
"#;

/// Create all tables and indexes that do not exist yet
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(SCHEMA_SQL).await?;
    Ok(())
}
