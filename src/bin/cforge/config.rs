use anyhow::{Result, bail};

use cube_forge::io::{ReadConfig, WriteConfig};

use crate::cli::{ReadOptions, WriteOptions};

pub fn build_read_config(opts: &ReadOptions) -> Result<ReadConfig> {
    if !opts.bond_tolerance.is_finite() {
        bail!("--bond-tolerance must be a finite number");
    }
    if !opts.min_bond_distance.is_finite() || opts.min_bond_distance < 0.0 {
        bail!("--min-bond-distance must be a non-negative number");
    }

    Ok(ReadConfig {
        bond_tolerance: opts.bond_tolerance,
        min_bond_distance: opts.min_bond_distance,
    })
}

pub fn build_write_config(opts: &WriteOptions) -> Result<WriteConfig> {
    let mut config = WriteConfig::default();

    if let Some(banner) = &opts.banner {
        // a newline would shift every following line of the file
        if banner.contains(['\n', '\r']) {
            bail!("--banner must be a single line");
        }
        config.banner = banner.clone();
    }

    if let Some(name) = &opts.name {
        if name.contains(['\n', '\r']) {
            bail!("--name must be a single line");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_opts(bond_tolerance: f64, min_bond_distance: f64) -> ReadOptions {
        ReadOptions {
            bond_tolerance,
            min_bond_distance,
        }
    }

    fn write_opts(banner: Option<&str>, name: Option<&str>) -> WriteOptions {
        WriteOptions {
            output: None,
            cube: 0,
            banner: banner.map(String::from),
            name: name.map(String::from),
        }
    }

    #[test]
    fn read_config_copies_tolerances() {
        let config = build_read_config(&read_opts(0.3, 0.1)).unwrap();
        assert_eq!(config.bond_tolerance, 0.3);
        assert_eq!(config.min_bond_distance, 0.1);
    }

    #[test]
    fn read_config_rejects_bad_values() {
        assert!(build_read_config(&read_opts(f64::NAN, 0.32)).is_err());
        assert!(build_read_config(&read_opts(0.45, -1.0)).is_err());
        assert!(build_read_config(&read_opts(-0.2, 0.0)).is_ok());
    }

    #[test]
    fn write_config_defaults_banner() {
        let config = build_write_config(&write_opts(None, None)).unwrap();
        assert_eq!(config.banner, WriteConfig::default().banner);

        let config = build_write_config(&write_opts(Some("SCF density"), None)).unwrap();
        assert_eq!(config.banner, "SCF density");
    }

    #[test]
    fn write_config_rejects_multiline_text() {
        assert!(build_write_config(&write_opts(Some("a\nb"), None)).is_err());
        assert!(build_write_config(&write_opts(None, Some("a\r\nb"))).is_err());
    }
}
