//! Session authentication: request extractors and the login, logout, and
//! signup pages.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use log::{info, warn};
use minijinja::context;
use serde::{Deserialize, Serialize};

use super::render::FormView;
use super::{AppState, WebError, urls};
use crate::domain::{FormErrors, User, Username};
use crate::infra::{PasswordHash, SessionToken};
use crate::store::{StoreError, UserRepository};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "notekeep_session";

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const BAD_CREDENTIALS: &str = "Please enter a correct username and password.";

// ===========================================
// Extractors
// ===========================================

/// Who is making the request: a user, or nobody.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    user: Option<User>,
    token: Option<SessionToken>,
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    fn resolve(req: &HttpRequest) -> Result<Self, WebError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or(WebError::MissingState)?;

        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return Ok(Self::default());
        };

        let token = SessionToken::from_client(cookie.value());
        let user = state
            .store
            .session_user(&token, state.settings.session_ttl)?;
        Ok(Self {
            token: user.as_ref().map(|_| token),
            user,
        })
    }
}

impl FromRequest for Identity {
    type Error = WebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::resolve(req))
    }
}

/// A request from a logged-in user.
///
/// Extraction fails for anonymous requests with a redirect to the login
/// page, so handlers taking `LoggedIn` never run for them.
#[derive(Debug, Clone)]
pub struct LoggedIn(pub User);

impl FromRequest for LoggedIn {
    type Error = WebError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = Identity::resolve(req).and_then(|identity| match identity.user {
            Some(user) => Ok(LoggedIn(user)),
            None => Err(WebError::LoginRequired {
                next: req.path().to_string(),
            }),
        });
        ready(result)
    }
}

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

// ===========================================
// Login / Logout
// ===========================================

#[derive(Debug, Default, Deserialize)]
pub(super) struct NextQuery {
    next: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct LoginForm {
    username: String,
    #[serde(skip_serializing)]
    password: String,
    next: String,
}

pub(super) async fn login_form(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<NextQuery>,
) -> Result<HttpResponse, WebError> {
    let form = LoginForm {
        next: query.into_inner().next.unwrap_or_default(),
        ..LoginForm::default()
    };
    let errors = FormErrors::new();
    state.templates.page(
        "login.html",
        context! { user => identity.user(), form => FormView::new(&form, &errors) },
    )
}

pub(super) async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, WebError> {
    let form = form.into_inner();

    let user = match Username::new(&form.username) {
        Ok(name) => match state.store.find_user(&name)? {
            Some((user, hash)) if hash.verify(&form.password) => Some(user),
            _ => None,
        },
        Err(_) => None,
    };

    let Some(user) = user else {
        warn!("failed login for {:?}", form.username);
        let mut errors = FormErrors::new();
        errors.add_non_field(BAD_CREDENTIALS);
        return state.templates.page(
            "login.html",
            context! { form => FormView::new(&form, &errors) },
        );
    };

    let token = state
        .store
        .create_session(user.id(), state.settings.session_ttl)?;
    info!("user {} logged in", user.id());

    let target = if urls::is_local_path(&form.next) {
        form.next.as_str()
    } else {
        urls::LIST
    };

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .cookie(session_cookie(
            token.as_str().to_string(),
            state.settings.secure_cookies,
        ))
        .finish())
}

pub(super) async fn logout(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, WebError> {
    if let Some(token) = &identity.token {
        state.store.delete_session(token)?;
    }

    let mut removal = session_cookie(String::new(), state.settings.secure_cookies);
    removal.make_removal();

    let body = state.templates.render("logged_out.html", context! {})?;
    Ok(HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .cookie(removal)
        .body(body))
}

// ===========================================
// Signup
// ===========================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct SignupForm {
    username: String,
    #[serde(skip_serializing)]
    password: String,
    #[serde(skip_serializing)]
    password_confirm: String,
}

impl SignupForm {
    fn validate(&self) -> Result<Username, FormErrors> {
        let mut errors = FormErrors::new();

        let username = Username::new(&self.username)
            .map_err(|e| errors.add("username", e.to_string()))
            .ok();

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!(
                    "This password is too short. It must contain at least {} characters.",
                    MIN_PASSWORD_LENGTH
                ),
            );
        }
        if self.password != self.password_confirm {
            errors.add("password_confirm", "The two password fields didn't match.");
        }

        match (username, errors.into_result()) {
            (Some(username), Ok(())) => Ok(username),
            (_, Err(errors)) => Err(errors),
            (None, Ok(())) => Err(FormErrors::single("username", "username is required")),
        }
    }
}

pub(super) async fn signup_form(
    state: web::Data<AppState>,
    identity: Identity,
) -> Result<HttpResponse, WebError> {
    let form = SignupForm::default();
    let errors = FormErrors::new();
    state.templates.page(
        "signup.html",
        context! { user => identity.user(), form => FormView::new(&form, &errors) },
    )
}

pub(super) async fn signup(
    state: web::Data<AppState>,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse, WebError> {
    let form = form.into_inner();

    let errors = match form.validate() {
        Ok(username) => match state
            .store
            .create_user(&username, &PasswordHash::create(&form.password)?)
        {
            Ok(user) => {
                info!("registered user {} ({})", user.id(), user.username());
                return Ok(HttpResponse::Found()
                    .insert_header((header::LOCATION, urls::LOGIN))
                    .finish());
            }
            Err(StoreError::DuplicateUsername { .. }) => {
                FormErrors::single("username", "A user with that username already exists.")
            }
            Err(e) => return Err(e.into()),
        },
        Err(errors) => errors,
    };

    state.templates.page(
        "signup.html",
        context! { form => FormView::new(&form, &errors) },
    )
}
