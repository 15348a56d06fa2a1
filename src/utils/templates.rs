//! Email message templates.

/// Render the verification email body for a freshly issued code.
/// The code sits alone on its own line so plain-text clients show it
/// clearly.
pub fn verification_body(code: &str) -> String {
    format!(
        "Welcome to Inkpost!\n\
         \n\
         Your verification code is:\n\
         \n\
         {}\n\
         \n\
         The code expires shortly. If you did not create an account, you\n\
         can ignore this message.\n",
        code
    )
}
