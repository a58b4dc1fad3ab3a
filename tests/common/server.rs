//! Mock HTTP server and configuration helpers

use dataset_dl::{Config, SourceDescriptor, SourceFormat};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve `template` for GET `route`
pub async fn mount(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Four sources pointing at `server`, written under `base`
pub fn config_for(server: &MockServer, base: &Path) -> Config {
    let url = |route: &str| format!("{}{}", server.uri(), route);
    Config {
        base_dir: base.to_path_buf(),
        sources: vec![
            SourceDescriptor::new(
                "txt",
                SourceFormat::Text,
                url("/play.html"),
                "txt",
                "data.txt",
                "results_txt.txt",
            ),
            SourceDescriptor::new(
                "csv",
                SourceFormat::Csv,
                url("/2020.csv"),
                "csv",
                "data.csv",
                "results_csv.txt",
            ),
            SourceDescriptor::new(
                "excel",
                SourceFormat::Spreadsheet,
                url("/cattle.xlsx"),
                "excel",
                "data.xlsx",
                "results_xls.txt",
            ),
            SourceDescriptor::new(
                "json",
                SourceFormat::JsonRecords,
                url("/astros.json"),
                "json",
                "data.json",
                "results_json.txt",
            ),
        ],
        ..Default::default()
    }
}
