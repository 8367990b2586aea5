//! HTML page rendering.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use minijinja::{Environment, Value};
use serde::Serialize;

use super::{WebError, urls};
use crate::domain::FormErrors;

/// Site stylesheet, inlined into every page.
pub const STYLE: &str = r#"
body {
    font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 0 auto;
    padding: 2rem;
    color: #333;
}
header nav { border-bottom: 1px solid #eee; padding-bottom: 0.5rem; margin-bottom: 1.5rem; }
header nav a { margin-right: 1rem; }
a { color: #0066cc; text-decoration: none; }
a:hover { text-decoration: underline; }
.user { color: #666; margin-right: 0.5rem; }
form.inline { display: inline; }
label { display: block; margin-top: 1rem; font-weight: 600; }
input[type=text], input[type=password], textarea { width: 100%; padding: 0.4rem; box-sizing: border-box; }
textarea { min-height: 10rem; }
.errors { color: #b00020; margin: 0.25rem 0; padding-left: 1.2rem; }
.note-text { white-space: pre-wrap; }
.slug { color: #666; font-size: 0.9em; }
ul.notes li { margin-bottom: 0.25rem; }
"#;

const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}notekeep{% endblock %}</title>
    <style>{{ style|safe }}</style>
</head>
<body>
    <header>
        <nav>
            <a href="/">notekeep</a>
            {% if user %}
            <a href="/notes/">My notes</a>
            <a href="/add/">Add note</a>
            <span class="user">{{ user.username }}</span>
            <form method="post" action="/auth/logout/" class="inline"><button type="submit">Log out</button></form>
            {% else %}
            <a href="/auth/login/">Log in</a>
            <a href="/auth/signup/">Sign up</a>
            {% endif %}
        </nav>
    </header>
    <main>{% block content %}{% endblock %}</main>
</body>
</html>"#;

const FIELD_ERRORS: &str = r#"{% macro field_errors(errors, name) %}{% if errors.fields[name] %}<ul class="errors">{% for message in errors.fields[name] %}<li>{{ message }}</li>{% endfor %}</ul>{% endif %}{% endmacro %}
{% macro form_errors(errors) %}{% if errors.non_field %}<ul class="errors">{% for message in errors.non_field %}<li>{{ message }}</li>{% endfor %}</ul>{% endif %}{% endmacro %}"#;

const HOME: &str = r#"{% extends "base.html" %}
{% block content %}
<h1>Personal notes</h1>
<p>Keep short notes that only you can see.</p>
{% if user %}<p><a href="/notes/">Go to your notes</a></p>{% else %}<p><a href="/auth/login/">Log in</a> to start writing.</p>{% endif %}
{% endblock %}"#;

const LIST: &str = r#"{% extends "base.html" %}
{% block title %}My notes{% endblock %}
{% block content %}
<h1>My notes</h1>
{% if notes %}
<ul class="notes">
{% for note in notes %}
    <li><a href="{{ detail_url(note.slug) }}">{{ note.title }}</a></li>
{% endfor %}
</ul>
{% else %}
<p>No notes yet. <a href="/add/">Add one</a>.</p>
{% endif %}
{% endblock %}"#;

const DETAIL: &str = r#"{% extends "base.html" %}
{% block title %}{{ note.title }}{% endblock %}
{% block content %}
<article>
    <h1>{{ note.title }}</h1>
    <p class="slug">{{ note.slug }}</p>
    <div class="note-text">{{ note.text }}</div>
</article>
<p><a href="{{ edit_url(note.slug) }}">Edit</a> <a href="{{ delete_url(note.slug) }}">Delete</a></p>
{% endblock %}"#;

const NOTE_FORM: &str = r#"{% extends "base.html" %}
{% block title %}{{ heading }}{% endblock %}
{% block content %}
{% import "errors.html" as e %}
<h1>{{ heading }}</h1>
<form method="post" id="note-form">
    {{ e.form_errors(form.errors) }}
    <label for="id_title">Title</label>
    <input type="text" name="title" id="id_title" maxlength="100" value="{{ form.values.title }}">
    {{ e.field_errors(form.errors, "title") }}
    <label for="id_text">Text</label>
    <textarea name="text" id="id_text">{{ form.values.text }}</textarea>
    {{ e.field_errors(form.errors, "text") }}
    <label for="id_slug">Slug</label>
    <input type="text" name="slug" id="id_slug" maxlength="100" value="{{ form.values.slug }}">
    <small>Leave empty to build it from the title.</small>
    {{ e.field_errors(form.errors, "slug") }}
    <p><button type="submit">Save</button></p>
</form>
{% endblock %}"#;

const DELETE: &str = r#"{% extends "base.html" %}
{% block title %}Delete {{ note.title }}{% endblock %}
{% block content %}
<h1>Delete note</h1>
<p>Delete &ldquo;{{ note.title }}&rdquo;? This cannot be undone.</p>
<form method="post"><button type="submit">Delete</button></form>
{% endblock %}"#;

const SUCCESS: &str = r#"{% extends "base.html" %}
{% block title %}Done{% endblock %}
{% block content %}
<h1>Done!</h1>
<p><a href="/notes/">Back to your notes</a></p>
{% endblock %}"#;

const LOGIN: &str = r#"{% extends "base.html" %}
{% block title %}Log in{% endblock %}
{% block content %}
{% import "errors.html" as e %}
<h1>Log in</h1>
<form method="post" action="/auth/login/" id="login-form">
    {{ e.form_errors(form.errors) }}
    <input type="hidden" name="next" value="{{ form.values.next }}">
    <label for="id_username">Username</label>
    <input type="text" name="username" id="id_username" value="{{ form.values.username }}">
    <label for="id_password">Password</label>
    <input type="password" name="password" id="id_password">
    <p><button type="submit">Log in</button></p>
</form>
<p>No account? <a href="/auth/signup/">Sign up</a>.</p>
{% endblock %}"#;

const SIGNUP: &str = r#"{% extends "base.html" %}
{% block title %}Sign up{% endblock %}
{% block content %}
{% import "errors.html" as e %}
<h1>Sign up</h1>
<form method="post" action="/auth/signup/" id="signup-form">
    {{ e.form_errors(form.errors) }}
    <label for="id_username">Username</label>
    <input type="text" name="username" id="id_username" value="{{ form.values.username }}">
    {{ e.field_errors(form.errors, "username") }}
    <label for="id_password">Password</label>
    <input type="password" name="password" id="id_password">
    {{ e.field_errors(form.errors, "password") }}
    <label for="id_password_confirm">Password confirmation</label>
    <input type="password" name="password_confirm" id="id_password_confirm">
    {{ e.field_errors(form.errors, "password_confirm") }}
    <p><button type="submit">Sign up</button></p>
</form>
{% endblock %}"#;

const LOGGED_OUT: &str = r#"{% extends "base.html" %}
{% block title %}Logged out{% endblock %}
{% block content %}
<h1>Logged out</h1>
<p><a href="/auth/login/">Log in again</a></p>
{% endblock %}"#;

/// Body of the 404 page. Rendered without template data so it can be
/// produced from an error value alone.
pub const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Not found</title></head>
<body><h1>Not found</h1><p>The page you asked for does not exist.</p><p><a href="/notes/">Back to your notes</a></p></body>
</html>"#;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", BASE),
    ("errors.html", FIELD_ERRORS),
    ("home.html", HOME),
    ("list.html", LIST),
    ("detail.html", DETAIL),
    ("form.html", NOTE_FORM),
    ("delete.html", DELETE),
    ("success.html", SUCCESS),
    ("login.html", LOGIN),
    ("signup.html", SIGNUP),
    ("logged_out.html", LOGGED_OUT),
];

/// A form as handed to a template: the submitted values plus any errors.
#[derive(Debug, Serialize)]
pub struct FormView<'a, T: Serialize> {
    pub values: &'a T,
    pub errors: &'a FormErrors,
}

impl<'a, T: Serialize> FormView<'a, T> {
    pub fn new(values: &'a T, errors: &'a FormErrors) -> Self {
        Self { values, errors }
    }
}

/// The site's compiled templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Loads every page template.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        env.add_global("style", STYLE);
        // Slugs are validated tokens, so the built paths need no escaping.
        env.add_function("detail_url", |slug: String| {
            Value::from_safe_string(urls::detail(&slug))
        });
        env.add_function("edit_url", |slug: String| {
            Value::from_safe_string(urls::edit(&slug))
        });
        env.add_function("delete_url", |slug: String| {
            Value::from_safe_string(urls::delete(&slug))
        });
        Ok(Self { env })
    }

    /// Renders a named template to a string.
    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Renders a named template into a `200 OK` HTML response.
    pub fn page(&self, name: &str, ctx: impl Serialize) -> Result<HttpResponse, WebError> {
        let body = self.render(name, ctx)?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }
}
