//! Auth middleware.

use std::sync::Arc;

use fleet_app::auth::{AuthServiceError, token::TokenError};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use crate::{errors::ApiError, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized("No token provided, access denied"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let authenticated = state.app.auth.authenticate_bearer(token).await;

    match authenticated {
        Ok(tenant) => {
            depot.insert_tenant(tenant);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(into_api_error(error));
            ctrl.skip_rest();
        }
    }
}

fn into_api_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidToken(TokenError::Expired) => {
            ApiError::unauthorized("Token has expired")
        }
        AuthServiceError::InvalidToken(source) => {
            debug!("bearer token rejected: {source}");

            ApiError::unauthorized("Token is not valid")
        }
        AuthServiceError::TenantInactive => {
            ApiError::unauthorized("Invalid token or depot not active")
        }
        other => ApiError::internal("failed to authenticate bearer token", &other),
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
