//! HTML presenters for the list and detail pages.

use std::fmt::Write;
use std::num::NonZeroU32;

use catalog_client::{CatalogPage, EntityRecord};
use indoc::formatdoc;
use url::Url;

use crate::navigation::{NavigationAction, navigate, relative};
use crate::query::QueryState;

const STYLE: &str = "
body { margin: 0; padding: 20px; font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; }
.container { max-width: 1280px; margin: 0 auto; }
.search-container { display: flex; gap: 10px; margin-bottom: 2rem; }
.search-input { flex: 1 1 auto; padding: 12px 16px; font-size: 16px; }
.btn { padding: 10px 20px; border: 2px solid #5f677a; border-radius: 6px; color: #000; text-decoration: none; }
.btn.disabled { border-color: #bbb; color: #bbb; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(150px, 1fr)); gap: 24px; }
.card { text-decoration: none; color: inherit; background: #fafafa; border-radius: 12px; overflow: hidden; }
.card img { width: 100%; height: 150px; object-fit: cover; }
.card-info { padding: 12px; text-align: center; }
.pagination { display: flex; align-items: center; gap: 28px; margin: 2rem 0; }
.no-results { margin-top: 3rem; text-align: center; color: #666; }
.detail { display: flex; gap: 32px; margin-top: 16px; }
.detail img { width: 180px; height: 180px; object-fit: cover; }
";

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn document(title: &str, body: &str) -> String {
    formatdoc! {r#"
        <!DOCTYPE html>
        <html>
        <head>
        <meta charset="utf-8">
        <title>{title}</title>
        <style>{STYLE}</style>
        </head>
        <body>
        {body}
        </body>
        </html>
        "#,
        title = escape(title),
    }
}

/// The searchable list of entities.
///
/// `current` is the absolute URL of the request, all links are derived from it.
pub fn list_page(query: &QueryState, page: &CatalogPage, current: &Url) -> String {
    let search_form = formatdoc! {r#"
        <form class="search-container" method="GET" action="/search">
          <input class="search-input" type="text" name="name" placeholder="Nombre del personaje" value="{term}">
          <input type="hidden" name="from" value="{from}">
          <button class="btn" type="submit">Buscar</button>
        </form>"#,
        term = escape(&query.search_term),
        from = escape(&relative(current)),
    };

    let content = if page.is_empty() {
        r#"<div class="no-results">No se encontraron personajes</div>"#.to_string()
    } else {
        let mut cards = String::new();
        for record in &page.results {
            let _ = write!(
                cards,
                r#"<a href="/character/{id}" class="card"><img src="{image}" alt="{name}" loading="lazy"><div class="card-info"><h3>{name}</h3></div></a>"#,
                id = record.id,
                image = escape(record.image.as_str()),
                name = escape(&record.name),
            );
        }
        formatdoc! {r#"
            <div class="grid">{cards}</div>
            {pagination}"#,
            pagination = pagination(query.page_number, page, current),
        }
    };

    let body = formatdoc! {r#"
        <div class="container">
        <h1>Rick and Morty Characters</h1>
        {search_form}
        {content}
        </div>"#
    };
    document("Rick and Morty Characters", &body)
}

fn pagination(page_number: NonZeroU32, page: &CatalogPage, current: &Url) -> String {
    let link = |target: Option<NonZeroU32>, enabled: bool, label: &str| match target {
        Some(target) if enabled => {
            let href = relative(&navigate(current, &NavigationAction::GoToPage(target)));
            format!(r#"<a class="btn" href="{}">{label}</a>"#, escape(&href))
        },
        _ => format!(r#"<span class="btn disabled">{label}</span>"#),
    };

    let prev = link(
        NonZeroU32::new(page_number.get() - 1),
        page.info.has_prev,
        "Anterior",
    );
    let next = link(page_number.checked_add(1), page.info.has_next, "Siguiente");

    formatdoc! {r#"
        <div class="pagination">
          {prev}
          <span class="pagination-info">{page_number} / {page_count}</span>
          {next}
        </div>"#,
        page_count = page.info.page_count,
    }
}

/// A single entity.
pub fn detail_page(record: &EntityRecord) -> String {
    let body = formatdoc! {r#"
        <a href="/">Volver</a>
        <div class="detail">
          <img src="{image}" alt="{name}">
          <div>
            <h1>{name}</h1>
            <div class="row"><span>Status:</span> {status}</div>
            <div class="row"><span>Species:</span> {species}</div>
            <div class="row"><span>Gender:</span> {gender}</div>
            <div class="row"><span>Origin:</span> {origin}</div>
            <div class="row"><span>Location:</span> {location}</div>
          </div>
        </div>"#,
        image = escape(record.image.as_str()),
        name = escape(&record.name),
        status = escape(&record.status),
        species = escape(&record.species),
        gender = escape(&record.gender),
        origin = escape(&record.origin.name),
        location = escape(&record.location.name),
    };
    document(&format!("{} - Rick and Morty", record.name), &body)
}

/// A short message page, used for error responses.
pub fn message_page(title: &str, message: &str) -> String {
    let body = formatdoc! {r#"
        <a href="/">Volver</a>
        <div class="no-results">{message}</div>"#,
        message = escape(message),
    };
    document(title, &body)
}

#[cfg(test)]
mod tests {
    use catalog_client::{NamedLocation, PageInfo};
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: u64, name: &str) -> EntityRecord {
        EntityRecord {
            id,
            name: name.to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            gender: "Male".to_string(),
            image: Url::parse(&format!(
                "https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"
            ))
            .unwrap(),
            origin: NamedLocation {
                name: "Earth (C-137)".to_string(),
            },
            location: NamedLocation {
                name: "Citadel of Ricks".to_string(),
            },
        }
    }

    fn current(relative: &str) -> Url {
        Url::parse("http://localhost:8000/")
            .unwrap()
            .join(relative)
            .unwrap()
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn empty_page_shows_no_results() {
        let html = list_page(&QueryState::default(), &CatalogPage::empty(), &current("/"));
        assert!(html.contains("No se encontraron personajes"));
        assert!(!html.contains(r#"class="pagination""#));
    }

    #[test]
    fn list_links_pages_through_navigation() {
        let query = QueryState {
            search_term: "Rick".to_string(),
            page_number: NonZeroU32::new(2).unwrap(),
        };
        let page = CatalogPage {
            results: vec![record(1, "Rick Sanchez")],
            info: PageInfo {
                page_count: 3,
                has_next: true,
                has_prev: true,
            },
        };
        let html = list_page(&query, &page, &current("/?name=Rick&page=2"));

        assert!(html.contains(r#"href="/?name=Rick&amp;page=1""#));
        assert!(html.contains(r#"href="/?name=Rick&amp;page=3""#));
        assert!(html.contains("2 / 3"));
        assert!(html.contains(r#"href="/character/1""#));
        assert!(html.contains(r#"name="from" value="/?name=Rick&amp;page=2""#));
    }

    #[test]
    fn disabled_links_on_single_page() {
        let page = CatalogPage {
            results: vec![record(1, "Rick Sanchez")],
            info: PageInfo {
                page_count: 1,
                has_next: false,
                has_prev: false,
            },
        };
        let html = list_page(&QueryState::default(), &page, &current("/"));
        assert!(html.contains(r#"<span class="btn disabled">Anterior</span>"#));
        assert!(html.contains(r#"<span class="btn disabled">Siguiente</span>"#));
    }

    #[test]
    fn search_term_is_escaped_in_form() {
        let query = QueryState {
            search_term: r#""><script>"#.to_string(),
            ..Default::default()
        };
        let html = list_page(&query, &CatalogPage::empty(), &current("/"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn detail_shows_record_fields() {
        let html = detail_page(&record(1, "Rick Sanchez"));
        assert!(html.contains("<title>Rick Sanchez - Rick and Morty</title>"));
        assert!(html.contains("<h1>Rick Sanchez</h1>"));
        assert!(html.contains("Earth (C-137)"));
        assert!(html.contains("Citadel of Ricks"));
    }
}
