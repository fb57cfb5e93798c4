//! Layout components - page shell, headers, buttons, inputs

use axum::response::Html;

/// Escapes text for safe inclusion in HTML bodies and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders a page header with title and optional subtitle.
pub fn page_header(title: &str, subtitle: Option<&str>) -> String {
    let subtitle_html = subtitle
        .map(|s| format!(r#"<p class="text-gray-500 mt-2 text-center">{s}</p>"#))
        .unwrap_or_default();

    format!(
        r#"<div class="mb-6">
            <h1 class="text-4xl font-bold text-center text-gray-800">{title}</h1>
            {subtitle_html}
        </div>"#
    )
}

/// Renders a button with Tailwind styling.
///
/// Variants: `primary` (filled) and `outline`. Additional HTML attributes
/// such as `type` or `hx-*` are passed through verbatim.
pub fn button(text: &str, variant: &str, attributes: Option<&str>) -> String {
    let base_classes = "px-8 py-3 rounded-lg flex items-center gap-2 shadow-sm transition-colors";

    let variant_classes = match variant {
        "primary" => "bg-blue-500 hover:bg-blue-600 text-white disabled:bg-blue-300",
        "outline" => {
            "bg-white text-blue-500 border border-blue-500 hover:bg-blue-50 disabled:opacity-50"
        }
        _ => "bg-gray-600 hover:bg-gray-700 text-white",
    };

    let attrs = attributes.unwrap_or("");

    format!(r#"<button class="{base_classes} {variant_classes}" {attrs}>{text}</button>"#)
}

/// Renders an input field with Tailwind styling.
pub fn input(name: &str, placeholder: &str, input_type: &str, attributes: Option<&str>) -> String {
    let attrs = attributes.unwrap_or("");

    format!(
        r#"<input type="{input_type}" id="{name}-input" name="{name}" placeholder="{placeholder}"
                  class="flex-1 p-4 border rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-blue-500 shadow-sm"
                  {attrs} />"#
    )
}

/// Renders a spinning loader icon; visible only while an HTMX request runs.
pub fn spinner(id: &str) -> String {
    format!(
        r#"<svg id="{id}" class="htmx-indicator h-5 w-5 animate-spin" viewBox="0 0 24 24" fill="none">
            <circle cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4" class="opacity-25"></circle>
            <path d="M4 12a8 8 0 018-8" stroke="currentColor" stroke-width="4" class="opacity-75"></path>
        </svg>"#
    )
}

/// Wraps content in the full HTML document with Tailwind and HTMX loaded.
pub fn render_page(title: &str, content: &str) -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
        <html lang="en">
        <head>
            <title>{title} - Drape</title>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <script src="https://cdn.tailwindcss.com?plugins=line-clamp"></script>
            <script src="https://unpkg.com/htmx.org@1.9.10"></script>
            <style>
                .htmx-indicator {{ display: none; }}
                .htmx-request .htmx-indicator {{ display: inline-block; }}
                .htmx-request.htmx-indicator {{ display: inline-block; }}
                .htmx-request .idle-label {{ display: none; }}
            </style>
        </head>
        <body class="min-h-screen bg-gray-50">
            <main class="max-w-6xl mx-auto p-6">
                {content}
            </main>
        </body>
        </html>"#,
        title = html_escape(title),
    );

    Html(html)
}
