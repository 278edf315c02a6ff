use crate::catalog::Movie;
use crate::search::{MoviesView, UiState};
use crate::trending::TrendRecord;

pub const NO_POSTER_TEXT: &str = "No poster available";
pub const MISSING_VALUE: &str = "N/A";

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn search_input(query: &str) -> String {
    format!(
        r#"<div class="search"><div><img src="/search.svg" alt="search" /><input id="search-input" type="text" placeholder="Search through thousands of movies" value="{}" autocomplete="off" /></div></div>"#,
        escape_html(query)
    )
}

pub fn spinner() -> String {
    r#"<div role="status" class="spinner"><span class="sr-only">Loading...</span></div>"#.to_string()
}

pub fn movie_card(movie: &Movie) -> String {
    let title = escape_html(&movie.title);
    let poster = match movie.poster_url() {
        Some(url) => format!(r#"<img src="{}" alt="{}" />"#, escape_html(&url), title),
        None => format!(r#"<div class="no-poster">{}</div>"#, NO_POSTER_TEXT),
    };
    let rating = movie
        .rating_label()
        .unwrap_or_else(|| MISSING_VALUE.to_string());
    let language = movie
        .original_language
        .as_deref()
        .filter(|lang| !lang.is_empty())
        .unwrap_or(MISSING_VALUE);
    let year = movie.release_year().unwrap_or(MISSING_VALUE);

    format!(
        concat!(
            r#"<li class="movie-card">{}<div class="mt-4"><h3>{}</h3>"#,
            r#"<div class="content"><div class="rating"><img src="/star.svg" alt="Star Icon" /><p>{}</p></div>"#,
            r#"<span>•</span><p class="lang">{}</p><span>•</span><p class="year">{}</p></div></div></li>"#
        ),
        poster,
        title,
        rating,
        escape_html(language),
        escape_html(year)
    )
}

/// Ranked poster strip. Empty when there is nothing trending, so the section is omitted.
pub fn trending_list(records: &[TrendRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let items: String = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let poster = match &record.poster_url {
                Some(url) => format!(
                    r#"<img src="{}" alt="{}" />"#,
                    escape_html(url),
                    escape_html(&record.title)
                ),
                None => format!(r#"<div class="no-poster">{}</div>"#, NO_POSTER_TEXT),
            };
            format!(r#"<li><p>{}</p>{}</li>"#, index + 1, poster)
        })
        .collect();

    format!(
        r#"<section class="trending"><h2>Trending Movies</h2><ul>{}</ul></section>"#,
        items
    )
}

/// The "All Movies" section: spinner, error text or card grid.
pub fn movies_section(state: &UiState) -> String {
    let body = match state.movies_view() {
        MoviesView::Loading => spinner(),
        MoviesView::Error(message) => {
            format!(r#"<p class="text-red-500">{}</p>"#, escape_html(message))
        }
        MoviesView::Movies(movies) => {
            let cards: String = movies.iter().map(movie_card).collect();
            format!("<ul>{}</ul>", cards)
        }
    };

    format!(
        r#"<section class="all-movies" id="all-movies"><h2>All Movies</h2>{}</section>"#,
        body
    )
}
