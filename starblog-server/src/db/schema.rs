/// SQL schema for the Star Wars blog database
/// Creates all tables with proper constraints, foreign keys, and indexes
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL CHECK(length(username) BETWEEN 1 AND 80),
    email TEXT UNIQUE NOT NULL CHECK(length(email) <= 120),
    password_hash TEXT NOT NULL,
    profile_picture TEXT CHECK(profile_picture IS NULL OR length(profile_picture) <= 255),
    bio TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

-- Planets table (reference data)
CREATE TABLE IF NOT EXISTS planets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    climate TEXT,
    terrain TEXT,
    population INTEGER CHECK(population IS NULL OR population >= 0),
    created_at TEXT NOT NULL
);

-- Characters table (reference data)
CREATE TABLE IF NOT EXISTS characters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    gender TEXT,
    homeworld_id INTEGER,
    created_at TEXT NOT NULL,
    FOREIGN KEY (homeworld_id) REFERENCES planets(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_characters_homeworld ON characters(homeworld_id);

-- Favorites table: each row points at exactly one character or planet
CREATE TABLE IF NOT EXISTS favorites (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    character_id INTEGER,
    planet_id INTEGER,
    created_at TEXT NOT NULL,
    CHECK ((character_id IS NULL) <> (planet_id IS NULL)),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (character_id) REFERENCES characters(id) ON DELETE CASCADE,
    FOREIGN KEY (planet_id) REFERENCES planets(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    image_url TEXT NOT NULL CHECK(length(image_url) <= 255),
    caption TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_posts_user ON posts(user_id);

-- Comments table
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id);
CREATE INDEX IF NOT EXISTS idx_comments_user ON comments(user_id);

-- Likes table
CREATE TABLE IF NOT EXISTS likes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    post_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_likes_post ON likes(post_id);
CREATE INDEX IF NOT EXISTS idx_likes_user ON likes(user_id);

-- Follows table (one-way relationships between users)
CREATE TABLE IF NOT EXISTS follows (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    follower_id INTEGER NOT NULL,
    followed_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (follower_id, followed_id),
    CHECK (follower_id <> followed_id),
    FOREIGN KEY (follower_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (followed_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_follows_follower ON follows(follower_id);
CREATE INDEX IF NOT EXISTS idx_follows_followed ON follows(followed_id);
"#;

/// Drops every table, children first
pub const DROP_SCHEMA: &str = r#"
DROP TABLE IF EXISTS follows;
DROP TABLE IF EXISTS likes;
DROP TABLE IF EXISTS comments;
DROP TABLE IF EXISTS posts;
DROP TABLE IF EXISTS favorites;
DROP TABLE IF EXISTS characters;
DROP TABLE IF EXISTS planets;
DROP TABLE IF EXISTS users;
"#;

/// Table names in creation order
pub const TABLES: [&str; 8] = [
    "users",
    "planets",
    "characters",
    "favorites",
    "posts",
    "comments",
    "likes",
    "follows",
];

/// Demo data for development and testing:
/// - 3 users (luke, leia, han)
/// - 4 planets and 4 characters
/// - favorites on both characters and planets
/// - posts with comments, likes and follows between the users
pub const SEED_DATA: &str = r#"
-- ============================================================================
-- USERS
-- ============================================================================
INSERT OR IGNORE INTO users (id, username, email, password_hash, profile_picture, bio, is_active, created_at) VALUES
    (1, 'luke', 'luke@tatooine.net', 'pbkdf2:sha256:600000$seed$6c756b65', NULL, 'Moisture farmer turned Jedi', 1, '2024-01-01T00:00:00+00:00'),
    (2, 'leia', 'leia@alderaan.gov', 'pbkdf2:sha256:600000$seed$6c656961', 'https://img.starblog.dev/leia.png', 'Senator and general', 1, '2024-01-02T00:00:00+00:00'),
    (3, 'han', 'han@falcon.space', 'pbkdf2:sha256:600000$seed$68616e', NULL, NULL, 1, '2024-01-03T00:00:00+00:00');

-- ============================================================================
-- REFERENCE DATA
-- ============================================================================
INSERT OR IGNORE INTO planets (id, name, climate, terrain, population, created_at) VALUES
    (1, 'Tatooine', 'arid', 'desert', 200000, '2024-01-01T00:00:00+00:00'),
    (2, 'Alderaan', 'temperate', 'grasslands, mountains', 2000000000, '2024-01-01T00:00:00+00:00'),
    (3, 'Hoth', 'frozen', 'tundra, ice caves, mountain ranges', NULL, '2024-01-01T00:00:00+00:00'),
    (4, 'Corellia', 'temperate', 'plains, urban, hills, forests', 3000000000, '2024-01-01T00:00:00+00:00');

INSERT OR IGNORE INTO characters (id, name, gender, homeworld_id, created_at) VALUES
    (1, 'Luke Skywalker', 'male', 1, '2024-01-01T00:00:00+00:00'),
    (2, 'Leia Organa', 'female', 2, '2024-01-01T00:00:00+00:00'),
    (3, 'Han Solo', 'male', 4, '2024-01-01T00:00:00+00:00'),
    (4, 'R2-D2', 'n/a', NULL, '2024-01-01T00:00:00+00:00');

INSERT OR IGNORE INTO favorites (id, user_id, character_id, planet_id, created_at) VALUES
    (1, 1, 2, NULL, '2024-01-05T10:00:00+00:00'),
    (2, 1, NULL, 1, '2024-01-05T10:05:00+00:00'),
    (3, 2, 3, NULL, '2024-01-06T09:00:00+00:00');

-- ============================================================================
-- SOCIAL DATA
-- ============================================================================
INSERT OR IGNORE INTO posts (id, user_id, image_url, caption, created_at) VALUES
    (1, 1, 'https://img.starblog.dev/twin-suns.jpg', 'Binary sunset again', '2024-01-10T18:00:00+00:00'),
    (2, 2, 'https://img.starblog.dev/plans.jpg', NULL, '2024-01-11T08:30:00+00:00'),
    (3, 3, 'https://img.starblog.dev/kessel.jpg', 'Under twelve parsecs', '2024-01-12T21:15:00+00:00');

INSERT OR IGNORE INTO comments (id, user_id, post_id, content, created_at) VALUES
    (1, 2, 1, 'You should come to Alderaan sometime', '2024-01-10T18:30:00+00:00'),
    (2, 3, 1, 'Nice view, kid', '2024-01-10T19:00:00+00:00'),
    (3, 1, 3, 'That is not how parsecs work', '2024-01-12T21:40:00+00:00');

INSERT OR IGNORE INTO likes (id, user_id, post_id, created_at) VALUES
    (1, 2, 1, '2024-01-10T18:31:00+00:00'),
    (2, 3, 1, '2024-01-10T19:01:00+00:00'),
    (3, 1, 2, '2024-01-11T09:00:00+00:00');

INSERT OR IGNORE INTO follows (id, follower_id, followed_id, created_at) VALUES
    (1, 1, 2, '2024-01-04T12:00:00+00:00'),
    (2, 2, 1, '2024-01-04T12:10:00+00:00'),
    (3, 3, 2, '2024-01-04T13:00:00+00:00');
"#;
