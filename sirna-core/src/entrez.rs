//! Entrez E-utilities client
//!
//! Retrieves nucleotide records from the NCBI nucleotide database by
//! driving `curl` as an external process. NCBI asks for a contact email
//! on E-utilities traffic so they can reach a user before blocking
//! access; when one is supplied it is forwarded on every request.

use crate::record::GenBankRecord;
use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::process::Command;

const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";
const TOOL_NAME: &str = "sirna";

pub struct EntrezClient {
    curl_path: PathBuf,
    email: Option<String>,
}

impl EntrezClient {
    pub fn new(email: Option<String>) -> Result<Self> {
        let curl_path = which::which("curl")
            .map_err(|e| anyhow!("curl not found in PATH (required for Entrez retrieval): {}", e))?;
        Ok(Self { curl_path, email })
    }

    fn efetch_url(&self, accession: &str) -> String {
        let mut url = format!(
            "{}?db=nucleotide&id={}&retmode=xml",
            EFETCH_URL,
            urlencoding::encode(accession)
        );
        if let Some(email) = &self.email {
            url.push_str(&format!(
                "&tool={}&email={}",
                TOOL_NAME,
                urlencoding::encode(email)
            ));
        }
        url
    }

    /// Fetch the raw efetch XML for an accession number.
    pub fn fetch_record_xml(&self, accession: &str) -> Result<String> {
        let url = self.efetch_url(accession);
        log::info!("Fetching nucleotide record {} from Entrez", accession);

        let output = Command::new(&self.curl_path)
            .arg("-sS")
            .arg("--fail")
            .arg(&url)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("efetch for {} failed: {}", accession, stderr.trim()));
        }

        Ok(String::from_utf8(output.stdout)?)
    }

    /// Fetch a record and splice its exons into the coding sequence.
    pub fn fetch_coding_sequence(&self, accession: &str) -> Result<String> {
        let xml = self.fetch_record_xml(accession)?;
        let record = GenBankRecord::parse(&xml)?;
        log::info!(
            "Record {} carries {} exon feature(s)",
            record.accession.as_deref().unwrap_or(accession),
            record.exons.len()
        );
        Ok(record.coding_sequence()?)
    }
}
