//! Static API definition generation for Taskcluster services
//!
//! This crate fetches the service manifest, every reference document and
//! every JSON schema they point at, and renders them as a Rust source file
//! with two sorted tables:
//!
//! - `SERVICES`: manifest name -> [`definitions::Service`]
//! - `SCHEMAS`: schema URL -> raw schema text
//!
//! Any failed fetch or unparseable document aborts generation; nothing is
//! written in that case.

pub mod definitions;
mod emitter;
mod schemas;
mod templates;

pub use emitter::{emit_schemas, emit_services, is_valid_binding, is_valid_module_path};
pub use schemas::{schema_urls, SchemaCollector};

use std::fs;
use std::path::Path;
use std::sync::Arc;
use taskcluster_cli_client::{fetch_manifest, fetch_references, with_deadline, Fetcher};
use taskcluster_cli_common::{CliError, Result, SchemaSet, ServiceMap, Settings};
use tera::Tera;
use tracing::info;

/// Naming of the generated file's bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Name of the services table
    pub services_var: String,
    /// Name of the schemas table
    pub schemas_var: String,
    /// Module path providing `Service` and `Entry`
    pub definitions_path: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            services_var: "SERVICES".to_string(),
            schemas_var: "SCHEMAS".to_string(),
            definitions_path: "taskcluster_cli_generator::definitions".to_string(),
        }
    }
}

/// API definition generator
///
/// Fetch stages run in order (manifest, references, schemas); each stage
/// fans out up to the configured concurrency and completes before the next
/// one starts.
pub struct ApiGenerator {
    settings: Settings,
    fetcher: Arc<dyn Fetcher>,
    options: GenerateOptions,
    tera: Tera,
}

impl ApiGenerator {
    /// Create a new generator, rejecting binding names that are not identifiers
    /// and definition paths that are not module paths
    pub fn new(settings: Settings, fetcher: Arc<dyn Fetcher>, options: GenerateOptions) -> Result<Self> {
        for name in [&options.services_var, &options.schemas_var] {
            if !is_valid_binding(name) {
                return Err(CliError::Generation(format!(
                    "Invalid binding name: {:?}",
                    name
                )));
            }
        }
        if !is_valid_module_path(&options.definitions_path) {
            return Err(CliError::Generation(format!(
                "Invalid definitions module path: {:?}",
                options.definitions_path
            )));
        }
        if options.services_var == options.schemas_var {
            return Err(CliError::Generation(
                "Services and schemas bindings must differ".to_string(),
            ));
        }

        let tera = templates::load_templates()?;
        Ok(Self {
            settings,
            fetcher,
            options,
            tera,
        })
    }

    /// Fetch every service reference and the schemas they reference
    pub async fn fetch(&self) -> Result<(ServiceMap, SchemaSet)> {
        with_deadline(
            "fetching API definitions",
            self.settings.cycle_timeout(),
            self.fetch_stages(),
        )
        .await
    }

    async fn fetch_stages(&self) -> Result<(ServiceMap, SchemaSet)> {
        let fetcher = self.fetcher.as_ref();
        let concurrency = self.settings.concurrency;

        let manifest = fetch_manifest(fetcher, &self.settings.manifest_url).await?;

        info!(services = manifest.len(), "Fetching services");
        let services = fetch_references(fetcher, &manifest, concurrency).await?;

        info!("Fetching schemas");
        let schemas = SchemaCollector::new(fetcher, concurrency)
            .collect(services.values().flat_map(|service| &service.entries))
            .await?;

        Ok((services, schemas))
    }

    /// Render the generated source file
    pub fn render(&self, services: &ServiceMap, schemas: &SchemaSet) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("definitions_path", &self.options.definitions_path);
        context.insert("manifest_url", &self.settings.manifest_url);
        context.insert(
            "services_source",
            &emit_services(&self.options.services_var, services),
        );
        context.insert(
            "schemas_source",
            &emit_schemas(&self.options.schemas_var, schemas),
        );

        self.tera
            .render("apis.rs", &context)
            .map_err(|e| CliError::Generation(format!("Template error: {:?}", e)))
    }

    /// Fetch and render in one go
    pub async fn generate(&self) -> Result<String> {
        let (services, schemas) = self.fetch().await?;
        info!(
            services = services.len(),
            schemas = schemas.len(),
            "Rendering API definitions"
        );
        self.render(&services, &schemas)
    }

    /// Generate and write the source file to `path`, creating parent directories
    pub async fn generate_to_file(&self, path: &Path) -> Result<()> {
        let source = self.generate().await?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::Generation(format!("Failed to create output directory: {}", e))
            })?;
        }
        fs::write(path, source).map_err(|e| {
            CliError::Generation(format!("Failed to write {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}
