use crate::utils::error::{CatalogError, Result};
use std::net::IpAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_ip_address(field_name: &str, address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: "IP address cannot be empty".to_string(),
        });
    }

    address
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|e| CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: format!("Invalid IP address: {}", e),
        })
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(CatalogError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Allowed values: {}", allowed.join(", ")),
    })
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CatalogError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ip_address() {
        assert!(validate_ip_address("chain.blacklisted_ips", "104.31.2.164").is_ok());
        assert!(validate_ip_address("chain.blacklisted_ips", "::1").is_ok());
        assert!(validate_ip_address("chain.blacklisted_ips", "").is_err());
        assert!(validate_ip_address("chain.blacklisted_ips", "300.1.1.1").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("iterator.network", "facebook", &["facebook", "linkedin"]).is_ok());
        assert!(validate_one_of("iterator.network", "myspace", &["facebook", "linkedin"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let absent: Option<u32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("x", &absent),
            Err(CatalogError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("catalog.title", "patterns").is_ok());
        assert!(validate_non_empty_string("catalog.title", "   ").is_err());
    }
}
