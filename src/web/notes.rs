//! Note pages.
//!
//! Every handler except [`home`] takes [`LoggedIn`], so anonymous requests
//! are redirected to the login page before any note is looked up.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use minijinja::context;

use super::auth::{Identity, LoggedIn};
use super::render::FormView;
use super::{AppState, WebError, urls};
use crate::access::{self, SubmitError};
use crate::domain::{FormErrors, NoteForm, User};

const ADD_HEADING: &str = "Add note";
const EDIT_HEADING: &str = "Edit note";

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn note_form_page(
    state: &AppState,
    user: &User,
    heading: &str,
    form: &NoteForm,
    errors: &FormErrors,
) -> Result<HttpResponse, WebError> {
    state.templates.page(
        "form.html",
        context! { user => user, heading => heading, form => FormView::new(form, errors) },
    )
}

/// Redirects to the success page, or re-renders the form when it did not
/// validate.
fn after_submit(
    state: &AppState,
    user: &User,
    heading: &str,
    form: &NoteForm,
    result: Result<(), SubmitError>,
) -> Result<HttpResponse, WebError> {
    match result {
        Ok(()) => Ok(redirect(urls::SUCCESS)),
        Err(SubmitError::Invalid(errors)) => note_form_page(state, user, heading, form, &errors),
        Err(SubmitError::Access(e)) => Err(e.into()),
    }
}

pub(super) async fn home(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, WebError> {
    state
        .templates
        .page("home.html", context! { user => identity.user() })
}

pub(super) async fn list(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
) -> Result<HttpResponse, WebError> {
    let notes = access::visible_notes(&state.store, &user)?;
    state
        .templates
        .page("list.html", context! { user => &user, notes => notes })
}

pub(super) async fn success(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
) -> Result<HttpResponse, WebError> {
    state
        .templates
        .page("success.html", context! { user => &user })
}

pub(super) async fn detail(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
    slug: web::Path<String>,
) -> Result<HttpResponse, WebError> {
    let note = access::owned_note(&state.store, &user, &slug)?;
    state
        .templates
        .page("detail.html", context! { user => &user, note => note })
}

// ===========================================
// Create
// ===========================================

pub(super) async fn add_form(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
) -> Result<HttpResponse, WebError> {
    note_form_page(
        &state,
        &user,
        ADD_HEADING,
        &NoteForm::default(),
        &FormErrors::new(),
    )
}

pub(super) async fn add(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
    form: web::Form<NoteForm>,
) -> Result<HttpResponse, WebError> {
    let form = form.into_inner();
    let result = access::create_note(&state.store, &user, &form).map(|_| ());
    after_submit(&state, &user, ADD_HEADING, &form, result)
}

// ===========================================
// Edit
// ===========================================

pub(super) async fn edit_form(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
    slug: web::Path<String>,
) -> Result<HttpResponse, WebError> {
    let note = access::owned_note(&state.store, &user, &slug)?;
    note_form_page(
        &state,
        &user,
        EDIT_HEADING,
        &NoteForm::from_note(&note),
        &FormErrors::new(),
    )
}

pub(super) async fn edit(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
    slug: web::Path<String>,
    form: web::Form<NoteForm>,
) -> Result<HttpResponse, WebError> {
    let form = form.into_inner();
    let result = access::update_note(&state.store, &user, &slug, &form).map(|_| ());
    after_submit(&state, &user, EDIT_HEADING, &form, result)
}

// ===========================================
// Delete
// ===========================================

pub(super) async fn delete_confirm(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
    slug: web::Path<String>,
) -> Result<HttpResponse, WebError> {
    let note = access::owned_note(&state.store, &user, &slug)?;
    state
        .templates
        .page("delete.html", context! { user => &user, note => note })
}

pub(super) async fn delete(
    state: web::Data<AppState>,
    LoggedIn(user): LoggedIn,
    slug: web::Path<String>,
) -> Result<HttpResponse, WebError> {
    access::delete_note(&state.store, &user, &slug)?;
    Ok(redirect(urls::SUCCESS))
}

/// Fallback for unrouted paths.
pub(super) async fn not_found() -> Result<HttpResponse, WebError> {
    Err(WebError::NotFound)
}
