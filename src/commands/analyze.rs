use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use seolens_lib::output::AnalysisReport;
use seolens_lib::types::InstantPagesResponse;
use seolens_lib::{
    shape_response, validate_target_url, AnalysisSession, Config, Credentials,
    InstantPagesClient, Result, SeoError,
};
use tracing::{debug, info};

use crate::cli::AnalyzeArgs;
use crate::formatting::{exit_code_for, render_error, write_output, RenderOptions};
use crate::settings::{flag_present, load_config};

/// Run the analyze command.
pub async fn run_analyze(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    args: AnalyzeArgs,
) -> ExitCode {
    let format = args.format;
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            return render_error(err, format, args.output.clone(), RenderOptions::default())
        }
    };
    let config = match apply_flag_overrides(config, raw_args, &args) {
        Ok(cfg) => cfg,
        Err(err) => {
            return render_error(err, format, args.output.clone(), RenderOptions::default())
        }
    };
    log_effective_config(config_path.as_deref(), &config);
    let options = RenderOptions::from(config.display);

    let credentials = resolve_credentials(&args, &config);
    let payload = args.payload.clone();

    let mut session = AnalysisSession::new();
    let started = session
        .run(&args.url, |url| {
            load_report(url, payload.as_deref(), &config, credentials)
        })
        .await;
    if !started {
        return render_error(
            SeoError::Config("a URL is required (e.g., --url https://example.com)".to_string()),
            format,
            args.output,
            options,
        );
    }

    let body = match session.into_output() {
        Some(body) => body,
        None => {
            return render_error(
                SeoError::Config("analysis did not finish".to_string()),
                format,
                args.output,
                options,
            )
        }
    };

    if let Err(err) = write_output(&body, format, args.output.clone(), options) {
        return render_error(
            SeoError::Config(err.to_string()),
            format,
            args.output,
            options,
        );
    }
    exit_code_for(&body)
}

/// Flags given on the command line win over the config file.
fn apply_flag_overrides(
    mut config: Config,
    raw_args: &[String],
    args: &AnalyzeArgs,
) -> Result<Config> {
    if let Some(endpoint) = &args.endpoint {
        config.api.endpoint = endpoint.clone();
    }
    if flag_present(raw_args, "--timeout") {
        config.timeouts.request = Duration::from_secs(args.timeout);
    }
    if flag_present(raw_args, "--decimal-places") {
        config.display.decimal_places = args.decimal_places;
    }
    config
        .validate()
        .map_err(|e| SeoError::Config(format!("Invalid flags: {}", e)))?;
    Ok(config)
}

/// Flags (or their environment variables) first, then the config file.
fn resolve_credentials(args: &AnalyzeArgs, config: &Config) -> Option<Credentials> {
    let login = args.login.clone().or_else(|| config.api.login.clone())?;
    let password = args.password.clone().or_else(|| config.api.password.clone())?;
    Some(Credentials::new(login, password))
}

async fn load_report(
    url: String,
    payload: Option<&Path>,
    config: &Config,
    credentials: Option<Credentials>,
) -> Result<AnalysisReport> {
    validate_target_url(&url)?;

    let response = match payload {
        Some(path) => read_payload(path)?,
        None => {
            let credentials = credentials.ok_or_else(|| {
                SeoError::Config(
                    "API credentials are missing: pass --login/--password or set DATAFORSEO_LOGIN/DATAFORSEO_PASSWORD"
                        .to_string(),
                )
            })?;
            let client = InstantPagesClient::from_config(config, Some(credentials))?;
            client.fetch(&url).await?
        }
    };

    let page = shape_response(&response)?;
    Ok(AnalysisReport::from_shaped(url, page, &config.performance))
}

fn read_payload(path: &Path) -> Result<InstantPagesResponse> {
    info!(path = %path.display(), "reading saved analysis response");
    let raw = std::fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

fn log_effective_config(config_source: Option<&Path>, config: &Config) {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let w = &config.performance.weights;
    debug!(
        source = %source,
        endpoint = %config.api.endpoint,
        request_timeout = ?config.timeouts.request,
        weights = %format!(
            "tti={:.2}, lcp={:.2}, fid={:.2}, duration={:.2}",
            w.time_to_interactive, w.largest_contentful_paint, w.first_input_delay, w.duration_time
        ),
        decimal_places = config.display.decimal_places,
        "effective config"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args(url: &str) -> AnalyzeArgs {
        AnalyzeArgs {
            url: url.to_string(),
            payload: None,
            login: None,
            password: None,
            endpoint: None,
            timeout: 120,
            decimal_places: 2,
            format: OutputFormat::Json,
            output: None,
        }
    }

    fn raw(flags: &[&str]) -> Vec<String> {
        flags.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_do_not_override_config() {
        let mut config = Config::default();
        config.display.decimal_places = 1;
        config.timeouts.request = Duration::from_secs(30);
        let resolved = apply_flag_overrides(
            config,
            &raw(&["seolens", "analyze"]),
            &args("https://a.example"),
        )
        .expect("valid");
        assert_eq!(resolved.display.decimal_places, 1);
        assert_eq!(resolved.timeouts.request, Duration::from_secs(30));
    }

    #[test]
    fn explicit_flags_override_config() {
        let mut a = args("https://a.example");
        a.decimal_places = 3;
        a.timeout = 15;
        a.endpoint = Some("http://127.0.0.1:8080/v3/on_page/instant_pages".to_string());
        let resolved = apply_flag_overrides(
            Config::default(),
            &raw(&["seolens", "analyze", "--decimal-places", "3", "--timeout=15"]),
            &a,
        )
        .expect("valid");
        assert_eq!(resolved.display.decimal_places, 3);
        assert_eq!(resolved.timeouts.request, Duration::from_secs(15));
        assert_eq!(resolved.api.endpoint, "http://127.0.0.1:8080/v3/on_page/instant_pages");
    }

    #[test]
    fn invalid_flag_values_are_rejected() {
        let mut a = args("https://a.example");
        a.timeout = 0;
        let err = apply_flag_overrides(Config::default(), &raw(&["--timeout", "0"]), &a)
            .unwrap_err();
        assert!(err.to_string().contains("timeouts.request"));
    }

    #[test]
    fn credentials_need_login_and_password() {
        let mut config = Config::default();
        assert!(resolve_credentials(&args("https://a.example"), &config).is_none());

        config.api.login = Some("cfg-user".to_string());
        config.api.password = Some("cfg-pass".to_string());
        let mut a = args("https://a.example");
        a.login = Some("flag-user".to_string());
        let creds = resolve_credentials(&a, &config).expect("credentials");
        assert_eq!(creds, Credentials::new("flag-user", "cfg-pass"));
    }

    #[tokio::test]
    async fn fetch_without_credentials_fails_before_network() {
        let err = load_report(
            "https://example.com".to_string(),
            None,
            &Config::default(),
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SeoError::Config(ref msg) if msg.contains("credentials")));
    }

    #[tokio::test]
    async fn url_without_scheme_is_rejected() {
        let err = load_report("example.com".to_string(), None, &Config::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SeoError::InvalidUrl(_)));
    }
}
