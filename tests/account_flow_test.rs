//! End-to-end account lifecycle tests.
//!
//! These run the real services against the in-memory adaptors, with a
//! recording mailer standing in for the SMTP collaborator.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use inkpost::domain::{RegisterUser, UpdateProfile};
use inkpost::errors::{AppError, AppResult};
use inkpost::infra::{
    EmailSender, FsImageStore, InMemoryCodes, InMemoryComments, InMemoryPosts, InMemoryUsers,
    UserStore,
};
use inkpost::services::{ServiceContainer, Services, TokenSigner};
use inkpost::Config;

// =============================================================================
// Test Collaborators
// =============================================================================

/// Mailer that records every message instead of sending it
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingMailer {
    fn last_body(&self) -> String {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|(_, _, body)| body.clone())
            .expect("no email recorded")
    }

    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push((
            recipient.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}

/// Pull the 6-digit verification code out of a recorded message body
fn extract_code(body: &str) -> String {
    body.lines()
        .find(|line| line.len() == 6 && line.chars().all(|c| c.is_ascii_digit()))
        .expect("no verification code in body")
        .to_string()
}

struct Harness {
    config: Config,
    services: Services,
    users: Arc<InMemoryUsers>,
    posts: Arc<InMemoryPosts>,
    comments: Arc<InMemoryComments>,
    mailer: Arc<RecordingMailer>,
    media: tempfile::TempDir,
}

async fn harness() -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = Config::from_env();
    let media = tempfile::tempdir().unwrap();

    let users = Arc::new(InMemoryUsers::new());
    let posts = Arc::new(InMemoryPosts::new());
    let comments = Arc::new(InMemoryComments::new());
    let mailer = Arc::new(RecordingMailer::default());
    let pics = Arc::new(
        FsImageStore::new(&media.path().to_string_lossy())
            .await
            .unwrap(),
    );

    let services = Services::from_collaborators(
        users.clone(),
        Arc::new(InMemoryCodes::new()),
        mailer.clone(),
        pics,
        posts.clone(),
        comments.clone(),
        &config,
    );

    Harness {
        config,
        services,
        users,
        posts,
        comments,
        mailer,
        media,
    }
}

const EMAIL: &str = "writer@example.com";
const PASSWORD: &str = "original-password";

async fn register_and_verify(h: &Harness) -> Uuid {
    let auth = h.services.auth();
    auth.register(RegisterUser {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    })
    .await
    .unwrap();

    let code = extract_code(&h.mailer.last_body());
    auth.verify_user(EMAIL, &code).await.unwrap();

    h.users.find_user_by_email(EMAIL).await.unwrap().id
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_register_then_verify_activates_account() {
    let h = harness().await;
    let auth = h.services.auth();

    auth.register(RegisterUser {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    })
    .await
    .unwrap();

    assert_eq!(h.mailer.sent_count(), 1);
    let user = h.users.find_user_by_email(EMAIL).await.unwrap();
    assert!(!user.is_verified);
    assert_eq!(user.display_name, EMAIL);
    // A just-registered address is held during the grace window
    assert!(!auth.check_email(EMAIL).await.unwrap());

    let code = extract_code(&h.mailer.last_body());
    auth.verify_user(EMAIL, &code).await.unwrap();

    let user = h.users.find_user_by_email(EMAIL).await.unwrap();
    assert!(user.is_verified);
    assert!(!auth.check_email(EMAIL).await.unwrap());
}

#[tokio::test]
async fn test_wrong_code_leaves_account_unverified() {
    let h = harness().await;
    let auth = h.services.auth();

    auth.register(RegisterUser {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    })
    .await
    .unwrap();

    let code = extract_code(&h.mailer.last_body());
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let result = auth.verify_user(EMAIL, wrong).await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
    assert!(!h.users.find_user_by_email(EMAIL).await.unwrap().is_verified);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let h = harness().await;
    let auth = h.services.auth();

    let request = RegisterUser {
        email: EMAIL.to_string(),
        password: PASSWORD.to_string(),
    };
    auth.register(request.clone()).await.unwrap();

    let second = auth.register(request).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
    // The conflict happened before the second email went out
    assert_eq!(h.mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_login_and_refresh_round_trip() {
    let h = harness().await;
    let user_id = register_and_verify(&h).await;
    let auth = h.services.auth();

    let denied = auth.login(EMAIL, "not-the-password").await;
    assert!(matches!(denied, Err(AppError::InvalidCredentials)));

    let pair = auth.login(EMAIL, PASSWORD).await.unwrap();
    let signer = TokenSigner::new(h.config.jwt_secret_bytes());

    let parsed = signer.parse_token(&pair.access_token).unwrap();
    assert_eq!(parsed.id, user_id);
    assert_eq!(parsed.username, "writer");
    assert_eq!(signer.parse_ref_token(&pair.refresh_token).unwrap(), user_id);

    let renewed = auth.refresh(&pair.refresh_token).await.unwrap();
    assert_eq!(signer.parse_token(&renewed.access_token).unwrap().id, user_id);
}

#[tokio::test]
async fn test_password_rotation() {
    let h = harness().await;
    let user_id = register_and_verify(&h).await;
    let auth = h.services.auth();
    let users = h.services.users();

    let wrong_old = users
        .update_password(user_id, "not-the-password", "rotated-password")
        .await;
    assert!(matches!(wrong_old, Err(AppError::InvalidCredentials)));
    // The stored hash is unchanged, so the original password still works
    auth.login(EMAIL, PASSWORD).await.unwrap();

    users
        .update_password(user_id, PASSWORD, "rotated-password")
        .await
        .unwrap();

    auth.login(EMAIL, "rotated-password").await.unwrap();
    let old_rejected = auth.login(EMAIL, PASSWORD).await;
    assert!(matches!(old_rejected, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_profile_update_is_partial() {
    let h = harness().await;
    let user_id = register_and_verify(&h).await;
    let users = h.services.users();

    users
        .update(
            user_id,
            UpdateProfile {
                bio: Some("writes about compilers".to_string()),
                ..UpdateProfile::default()
            },
        )
        .await
        .unwrap();

    let profile = users.get_user(user_id).await.unwrap();
    assert_eq!(profile.bio, "writes about compilers");
    assert_eq!(profile.display_name, EMAIL);
}

#[tokio::test]
async fn test_profile_pic_upload_links_stored_file() {
    let h = harness().await;
    let user_id = register_and_verify(&h).await;
    let users = h.services.users();

    let link = users
        .update_profile_pic(user_id, b"png-bytes", "png")
        .await
        .unwrap();
    assert_eq!(link, format!("{}.png", user_id));

    let profile = users.get_user(user_id).await.unwrap();
    assert_eq!(profile.profile_pic, link);

    let stored = tokio::fs::read(h.media.path().join("avatars").join(&link))
        .await
        .unwrap();
    assert_eq!(stored, b"png-bytes");
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_account_removes_user_and_owned_content() {
    let h = harness().await;
    let user_id = register_and_verify(&h).await;
    let users = h.services.users();

    h.posts.seed(user_id);
    h.posts.seed(user_id);
    h.comments.seed(user_id);
    let bystander = Uuid::new_v4();
    h.posts.seed(bystander);

    users.delete_account(user_id).await.unwrap();

    assert_eq!(h.posts.count_for(user_id), 0);
    assert_eq!(h.comments.count_for(user_id), 0);
    assert_eq!(h.posts.count_for(bystander), 1);
    assert!(matches!(
        h.users.find_user(user_id).await,
        Err(AppError::NotFound)
    ));

    // The idempotence boundary is explicit: the second delete fails at the
    // user-deletion step
    let second = users.delete_account(user_id).await;
    assert!(matches!(second, Err(AppError::NotFound)));
}
