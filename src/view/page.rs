use super::components::{movies_section, search_input, trending_list};
use crate::search::handlers::{ENDPOINT_MOVIES_PARTIAL, ENDPOINT_QUERY};
use crate::search::UiState;

const PAGE_TITLE: &str = "Movie Discovery";

/// Each keystroke is posted as is; debouncing happens server-side. The results
/// section is refreshed by polling its fragment.
const PAGE_SCRIPT: &str = r#"
(function () {
  const input = document.getElementById('search-input');
  const section = () => document.getElementById('all-movies');
  input.addEventListener('input', () => {
    fetch('__QUERY__', {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify({ query: input.value })
    }).catch((err) => console.error('Failed to send query', err));
  });
  let last = '';
  setInterval(async () => {
    try {
      const html = await (await fetch('__MOVIES__')).text();
      if (html !== last) {
        last = html;
        section().outerHTML = html;
      }
    } catch (err) {
      console.error('Failed to refresh movies', err);
    }
  }, 250);
})();
"#;

pub fn render_page(state: &UiState) -> String {
    let script = PAGE_SCRIPT
        .replace("__QUERY__", ENDPOINT_QUERY)
        .replace("__MOVIES__", ENDPOINT_MOVIES_PARTIAL);

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="en"><head><meta charset="utf-8" />"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1" />"#,
            "<title>{}</title></head><body><main>",
            r#"<div class="pattern"></div><div class="wrapper"><header>"#,
            r#"<img src="/hero.png" alt="Hero Banner" />"#,
            r#"<h1>Find <span class="text-gradient">Movies</span> You'll Enjoy Without the Hassle</h1>"#,
            "{}</header>{}{}</div></main><script>{}</script></body></html>"
        ),
        PAGE_TITLE,
        search_input(&state.query),
        trending_list(&state.trending_movies),
        movies_section(state),
        script
    )
}
