use color_eyre::eyre::{Report, Result};
use color_eyre::owo_colors::OwoColorize;
use color_eyre::Section;
use serde::Serialize;
use wrapica::errors::ResolveError;
use wrapica::types::{DataType, Icav2Uri, S3Uri};
use wrapica::{ByobResolver, ProjectRelativePath};

/// JSON output of `from-s3`.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct FromS3Output<'a> {
    project_id: &'a str,
    path: &'a str,
    data_type: DataType,
}

impl<'a> From<&'a ProjectRelativePath> for FromS3Output<'a> {
    fn from(p: &'a ProjectRelativePath) -> Self {
        Self {
            project_id: p.project_id.as_str(),
            path: &p.path,
            data_type: p.data_type(),
        }
    }
}

/// JSON output of `credential`.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct CredentialOutput<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_path: Option<String>,
}

pub fn to_s3(resolver: &ByobResolver, project: &str, path: &str) -> Result<()> {
    let project_id = resolver.coerce_project_id(project).map_err(hint)?;
    let uri = resolver.to_s3_uri(&project_id, path).map_err(hint)?;
    println!("{}", uri);
    Ok(())
}

pub fn from_s3(resolver: &ByobResolver, uri: &str, json: bool) -> Result<()> {
    let uri = S3Uri::try_from(uri)?;
    let location = resolver.to_project_relative_path(&uri).map_err(hint)?;
    if json {
        println!("{}", serde_json::to_string(&FromS3Output::from(&location))?);
    } else {
        println!("{}\t{}", location.project_id, location.path);
    }
    Ok(())
}

pub fn credential(resolver: &ByobResolver, uri: &str, relative: bool, json: bool) -> Result<()> {
    let uri = S3Uri::try_from(uri)?;
    let credential = resolver.resolve_credential(&uri).map_err(hint)?;
    let relative_path = if relative {
        Some(resolver.relative_path_from_credential(&credential.id, &uri)?)
    } else {
        None
    };
    if json {
        let output = CredentialOutput {
            id: credential.id.as_str(),
            name: &credential.name,
            relative_path,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if let Some(path) = relative_path {
        println!("{}\t{}", credential.id, path);
    } else {
        println!("{}", credential.id);
    }
    Ok(())
}

pub fn to_icav2(resolver: &ByobResolver, uri: &str) -> Result<()> {
    let uri = S3Uri::try_from(uri)?;
    let icav2_uri = resolver.s3_uri_to_icav2_uri(&uri).map_err(hint)?;
    println!("{}", icav2_uri);
    Ok(())
}

pub fn from_icav2(resolver: &ByobResolver, uri: &str) -> Result<()> {
    let uri = Icav2Uri::try_from(uri)?;
    let s3_uri = resolver.icav2_uri_to_s3_uri(&uri).map_err(hint)?;
    println!("{}", s3_uri);
    Ok(())
}

/// Explain what a not-found error usually means.
fn hint(e: ResolveError) -> Report {
    if e.is_not_found() {
        Report::new(e).suggestion(format!(
            "Is bring-your-own-bucket configured for it? Check the tables given by {}, {} and {}.",
            "--storage-configurations".bold(),
            "--project-mappings".bold(),
            "--storage-credentials".bold()
        ))
    } else {
        e.into()
    }
}
