#[cfg(not(feature = "no-entrypoint"))]
use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name: "stable.fun",
    project_url: "https://stable.fun",
    contacts: "email:hello@stable.fun",
    policy: "https://stable.fun/security",
    source_code: "https://github.com/stable-fun/stable-fun",
    auditors: "None"
}
