use crate::model::Roster;
use anyhow::{bail, Context};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait Storage {
    /// Charge le roster (aidants, disponibilités, heures en cours).
    fn load(&self) -> anyhow::Result<Roster>;
    /// Sauvegarde de manière atomique.
    fn save(&self, roster: &Roster) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Comme `load`, mais un fichier absent donne un roster vide.
    pub fn load_or_default(&self) -> anyhow::Result<Roster> {
        match fs::read(&self.path) {
            Ok(data) => parse(&data, &self.path),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no roster file, starting empty");
                Ok(Roster::default())
            }
            Err(err) => Err(err)
                .with_context(|| format!("reading caregiver roster {}", self.path.display())),
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Roster> {
        let data = fs::read(&self.path)
            .with_context(|| format!("reading caregiver roster {}", self.path.display()))?;
        parse(&data, &self.path)
    }

    fn save(&self, roster: &Roster) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(roster)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).context("creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).context("atomic rename")?;
        Ok(())
    }
}

fn parse(data: &[u8], path: &Path) -> anyhow::Result<Roster> {
    let roster: Roster = serde_json::from_slice(data).with_context(|| {
        format!(
            "parsing caregiver roster {} (expected {{\"caregivers\": [...]}})",
            path.display()
        )
    })?;
    if let Some(dup) = roster
        .caregivers
        .iter()
        .enumerate()
        .find(|(i, c)| roster.caregivers[..*i].iter().any(|o| o.name == c.name))
        .map(|(_, c)| c.name.as_str())
    {
        bail!("caregiver roster {} lists {dup} twice", path.display());
    }
    Ok(roster)
}
