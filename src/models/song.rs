use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::FilterError;

/// One entry of the song dataset, as it is seeded and as it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    /// The dataset's own numeric id, unrelated to the storage key.
    #[sqlx(rename = "track_id")]
    pub id: i64,
    pub track_name: String,
    pub artist_name: String,
    pub genre: String,
    /// Tempo in beats per minute.
    pub bpm: f64,
    pub energy: f64,
    pub danceability: f64,
    pub loudness: f64,
    pub liveness: f64,
    pub valence: f64,
    /// Track length in seconds.
    pub length: f64,
    pub acousticness: f64,
    pub speechiness: f64,
    pub popularity: f64,
}

/// A persisted song: the dataset record plus the key the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Song {
    #[serde(rename = "_id")]
    pub uid: Uuid,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub record: SongRecord,
}

/// Raw `/songs` query string, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct SongQuery {
    pub genre: Option<String>,
    pub danceability: Option<String>,
}

/// Case-sensitive, unanchored pattern matched against a song's genre.
///
/// The pattern is evaluated by `regex` in memory and by PostgreSQL's `~`
/// operator, so only syntax both engines read the same way is accepted:
/// backslash may only escape ASCII punctuation other than `<`/`>`, groups
/// may only be plain or `(?:..)`, and bracket expressions may not nest
/// (POSIX `[:class:]` aside) or use set operators.
#[derive(Debug, Clone)]
pub struct GenrePattern(Regex);

impl GenrePattern {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        check_portable(pattern).map_err(|reason| FilterError::UnsupportedGenre {
            pattern: pattern.to_string(),
            reason,
        })?;
        Ok(Self(Regex::new(pattern)?))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, genre: &str) -> bool {
        self.0.is_match(genre)
    }
}

fn check_portable(pattern: &str) -> Result<(), &'static str> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut in_bracket = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '\\' {
            match next {
                // `\<` and `\>` are word boundaries in `regex`, literals in PostgreSQL.
                Some(n) if n.is_ascii_punctuation() && n != '<' && n != '>' => i += 2,
                _ => return Err("backslash may only escape punctuation"),
            }
            continue;
        }

        if in_bracket {
            match (c, next) {
                ('[', Some(':')) => {
                    let rest: String = chars[i + 2..].iter().collect();
                    match rest.find(":]") {
                        Some(end) => i += 2 + rest[..end].chars().count() + 2,
                        None => return Err("unterminated character class"),
                    }
                    continue;
                }
                ('[', _) => return Err("nested bracket expressions are not supported"),
                ('&', Some('&')) | ('-', Some('-')) | ('~', Some('~')) => {
                    return Err("bracket set operations are not supported");
                }
                (']', _) => in_bracket = false,
                _ => {}
            }
            i += 1;
            continue;
        }

        match (c, next) {
            ('(', Some('?')) if chars.get(i + 2) != Some(&':') => {
                return Err("only (?:..) groups are supported");
            }
            ('{', Some(',')) => return Err("repetition needs a lower bound"),
            ('[', _) => {
                in_bracket = true;
                i += 1;
                if chars.get(i) == Some(&'^') {
                    i += 1;
                }
                // A leading `]` is a literal member.
                if chars.get(i) == Some(&']') {
                    i += 1;
                }
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    Ok(())
}

/// Validated listing filter. Songs match when their genre matches `genre`
/// (if any) and their danceability is strictly greater than `min_danceability`.
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub genre: Option<GenrePattern>,
    pub min_danceability: f64,
}

impl SongFilter {
    pub fn matches(&self, record: &SongRecord) -> bool {
        let genre_ok = self
            .genre
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(&record.genre));
        genre_ok && record.danceability > self.min_danceability
    }
}

impl TryFrom<SongQuery> for SongFilter {
    type Error = FilterError;

    fn try_from(query: SongQuery) -> Result<Self, Self::Error> {
        let genre = query.genre.as_deref().map(GenrePattern::new).transpose()?;

        let raw_danceability = query
            .danceability
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty());

        let min_danceability = match raw_danceability {
            None => 0.0,
            Some(raw) => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| FilterError::InvalidDanceability(raw.to_string()))?;
                if !value.is_finite() {
                    return Err(FilterError::InvalidDanceability(raw.to_string()));
                }
                if value < 0.0 {
                    return Err(FilterError::NegativeDanceability(value));
                }
                value
            }
        };

        Ok(SongFilter {
            genre,
            min_danceability,
        })
    }
}
