//! Server-rendered pages
//!
//! Two page shapes: the category index and the item list of one category.
//! User text is escaped before it reaches the markup and category names are
//! percent-encoded when used as URL path segments.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::domain::{Category, Item};
use crate::formatter::normalize_text;

/// Characters that must be encoded inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// URL of a category's item list
pub fn category_url(name: &str) -> String {
    format!("/categories/{}", utf8_percent_encode(name, PATH_SEGMENT))
}

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Anchor id for a category entry on the index page, unique per category
fn anchor_id(id: u32, name: &str) -> String {
    let normalized = normalize_text(name);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.is_empty() {
        format!("category-{}", id)
    } else {
        format!("category-{}-{}", id, words.join("-"))
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{}</title>
  <link rel="stylesheet" href="/css/styles.css">
</head>
<body>
{}
<footer>To-Do List</footer>
</body>
</html>
"#,
        escape_html(title),
        body
    )
}

/// Index page: today's date, every category, and the new-category form
pub fn render_index(date: &str, categories: &[Category]) -> String {
    let mut entries = String::new();
    for category in categories {
        entries.push_str(&format!(
            r#"  <form class="item" id="{anchor}" action="/delete" method="post">
    <input type="checkbox" name="itemCheckbox" value="{id}" onchange="this.form.submit()">
    <a href="{href}">{name}</a>
    <span class="count">{count}</span>
  </form>
"#,
            anchor = anchor_id(category.id, &category.name),
            id = category.id,
            href = escape_html(&category_url(&category.name)),
            name = escape_html(&category.name),
            count = category.items.len(),
        ));
    }

    let body = format!(
        r#"<div class="box" id="heading">
  <h1>{date}</h1>
</div>
<div class="box">
{entries}  <form class="item" action="/" method="post">
    <input type="text" name="newCategory" placeholder="New Category" autocomplete="off">
    <button type="submit" name="list">+</button>
  </form>
</div>"#,
        date = escape_html(date),
        entries = entries,
    );

    layout("To-Do List", &body)
}

/// Item list page for one category
pub fn render_list(list_title: &str, items: &[Item]) -> String {
    let url = escape_html(&category_url(list_title));
    let title = escape_html(list_title);

    let mut entries = String::new();
    for item in items {
        entries.push_str(&format!(
            r#"  <form class="item" action="{url}/delete" method="post">
    <input type="checkbox" name="itemCheckbox" value="{id}" onchange="this.form.submit()">
    <p>{name}</p>
    <input type="hidden" name="categoryName" value="{title}">
  </form>
"#,
            url = url,
            id = item.id,
            name = escape_html(&item.name),
            title = title,
        ));
    }

    let body = format!(
        r#"<div class="box" id="heading">
  <h1>{title}</h1>
</div>
<div class="box">
{entries}  <form class="item" action="{url}" method="post">
    <input type="text" name="newItem" placeholder="New Item" autocomplete="off">
    <input type="hidden" name="listTitle" value="{title}">
    <button type="submit">+</button>
  </form>
</div>
<p class="back"><a href="/">All categories</a></p>"#,
        title = title,
        entries = entries,
        url = url,
    );

    layout(list_title, &body)
}
