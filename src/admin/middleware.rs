// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::ValidatedConfig;
use actix_web::{
    Error, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::sync::Arc;

/// Middleware that gates the admin area behind the configured bearer token.
/// Requests without a matching `Authorization: Bearer` header get 401.
pub struct RequireAdminMiddleware {
    config: Arc<ValidatedConfig>,
}

impl RequireAdminMiddleware {
    pub fn new(config: Arc<ValidatedConfig>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddlewareService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct RequireAdminMiddlewareService<S> {
    service: S,
    config: Arc<ValidatedConfig>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !is_authorized(req.request(), &self.config) {
            log::warn!("Rejected unauthenticated admin request to {}", req.path());
            let (req, _) = req.into_parts();

            let response = HttpResponse::Unauthorized()
                .content_type("application/json")
                .body("{\"success\": false, \"message\": \"Authentication required\"}")
                .map_into_right_body();

            return Box::pin(async move { Ok(ServiceResponse::new(req, response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            // Map normal responses to left body
            fut.await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn is_authorized(req: &HttpRequest, config: &ValidatedConfig) -> bool {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token == config.admin.token)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_header_is_unauthorized() {
        let config = crate::config::test_config();
        let req = TestRequest::default().to_http_request();
        assert!(!is_authorized(&req, &config));
    }

    #[test]
    fn wrong_token_is_unauthorized() {
        let config = crate::config::test_config();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer wrong-token"))
            .to_http_request();
        assert!(!is_authorized(&req, &config));
    }

    #[test]
    fn matching_bearer_token_is_authorized() {
        let config = crate::config::test_config();
        let req = TestRequest::default()
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", config.admin.token),
            ))
            .to_http_request();
        assert!(is_authorized(&req, &config));
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let config = crate::config::test_config();
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, config.admin.token.clone()))
            .to_http_request();
        assert!(!is_authorized(&req, &config));
    }
}
