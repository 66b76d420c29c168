use argip_api_models::{LoginRequest, RegisterRequest, validation};

use crate::cli::{LoginArgs, RegisterArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::require_login;
use crate::output::render_user;
use crate::prompt::{resolve_new_password, resolve_password};

pub(crate) async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> CliResult<()> {
    let username = args.username.trim();
    let email = args.email.trim();
    validation::ensure_present("username", username)?;
    validation::validate_email(email)?;
    let password = resolve_new_password(args.password)?;

    let user = ctx
        .api
        .register(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password,
        })
        .await?;
    println!(
        "Registered {} <{}>; run `argip login --username {}` to sign in.",
        user.username, user.email, user.username
    );
    Ok(())
}

pub(crate) async fn handle_login(ctx: &AppContext, args: LoginArgs) -> CliResult<()> {
    let username = args.username.trim();
    validation::ensure_present("username", username)?;
    let password = resolve_password(args.password)?;

    let token = ctx
        .api
        .login(&LoginRequest {
            username: username.to_string(),
            password,
        })
        .await?;
    ctx.api.tokens().set(&token).map_err(CliError::failure)?;
    println!("Logged in as {username}.");
    Ok(())
}

/// Best-effort server revoke; the local token is cleared regardless.
pub(crate) async fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    if !ctx.api.tokens().is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    if let Err(err) = ctx.api.logout().await {
        tracing::debug!(error = %err.display_message(), "server-side logout failed");
    }
    ctx.api.tokens().remove().map_err(CliError::failure)?;
    println!("Logged out.");
    Ok(())
}

pub(crate) async fn handle_me(ctx: &AppContext) -> CliResult<()> {
    require_login(ctx)?;
    let user = ctx.api.current_user().await?;
    render_user(&user, ctx.output)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::commands::testing::context;
    use crate::session::{MemoryTokenStore, TokenStore};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn login_stores_the_token() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/login");
            then.status(200)
                .json_body(json!({"access_token": "uuid.secret", "token_type": "bearer"}));
        });

        let tokens = Arc::new(MemoryTokenStore::default());
        let ctx = context(&server.base_url(), tokens.clone(), true);
        handle_login(
            &ctx,
            LoginArgs {
                username: " jan ".to_string(),
                password: Some("sekret1".to_string()),
            },
        )
        .await
        .expect("login");
        mock.assert();
        assert_eq!(tokens.get().as_deref(), Some("uuid.secret"));
        assert!(tokens.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_the_token_even_when_the_server_fails() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/logout")
                .header("authorization", "Bearer tok");
            then.status(500);
        });

        let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
        let ctx = context(&server.base_url(), tokens.clone(), true);
        handle_logout(&ctx).await.expect("logout");
        mock.assert();
        assert_eq!(tokens.get(), None);
        assert!(!tokens.is_authenticated());
    }

    #[tokio::test]
    async fn register_validates_before_calling_the_server() {
        // No mocks: any request would come back 404 and fail differently.
        let server = MockServer::start_async().await;
        let ctx = context(&server.base_url(), Arc::new(MemoryTokenStore::default()), true);

        let err = handle_register(
            &ctx,
            RegisterArgs {
                username: "jan".to_string(),
                email: "not-an-email".to_string(),
                password: Some("sekret1".to_string()),
            },
        )
        .await
        .expect_err("invalid email");
        assert_eq!(err.display_message(), "Invalid email address");

        let err = handle_register(
            &ctx,
            RegisterArgs {
                username: "jan".to_string(),
                email: "jan@example.pl".to_string(),
                password: Some("123".to_string()),
            },
        )
        .await
        .expect_err("short password");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn register_surfaces_duplicate_detail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/register").json_body(json!({
                "username": "jan",
                "email": "jan@example.pl",
                "password": "sekret1"
            }));
            then.status(400)
                .json_body(json!({"detail": "Username already registered"}));
        });

        let ctx = context(&server.base_url(), Arc::new(MemoryTokenStore::default()), true);
        let err = handle_register(
            &ctx,
            RegisterArgs {
                username: "jan".to_string(),
                email: "jan@example.pl".to_string(),
                password: Some("sekret1".to_string()),
            },
        )
        .await
        .expect_err("duplicate");
        assert_eq!(err.display_message(), "Username already registered");
    }

    #[tokio::test]
    async fn me_requires_a_stored_token() {
        let server = MockServer::start_async().await;
        let ctx = context(&server.base_url(), Arc::new(MemoryTokenStore::default()), true);
        let err = handle_me(&ctx).await.expect_err("guarded");
        assert!(matches!(err, CliError::LoginRequired));
    }
}
