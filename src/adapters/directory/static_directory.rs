//! Fixed list of nearby providers. Mock records; no availability logic.

use crate::domain::{Doctor, DomainError};
use crate::ports::ProviderDirectoryPort;

pub struct StaticProviderDirectory {
    doctors: Vec<Doctor>,
}

impl StaticProviderDirectory {
    pub fn new() -> Self {
        Self {
            doctors: vec![
                doctor(
                    "1",
                    "Dr. Sarah Johnson",
                    "Internal Medicine",
                    4.8,
                    "0.8 mi",
                    "123 Health St, Medical District",
                    "(555) 123-4567",
                    &["9:00 AM", "11:30 AM", "2:00 PM", "4:30 PM"],
                ),
                doctor(
                    "2",
                    "Dr. Michael Chen",
                    "Emergency Medicine",
                    4.9,
                    "1.2 mi",
                    "456 Care Ave, Downtown",
                    "(555) 987-6543",
                    &["10:00 AM", "1:00 PM", "3:30 PM", "5:00 PM"],
                ),
                doctor(
                    "3",
                    "Dr. Emily Rodriguez",
                    "Family Medicine",
                    4.7,
                    "2.1 mi",
                    "789 Wellness Blvd, Suburb",
                    "(555) 456-7890",
                    &["8:30 AM", "12:00 PM", "2:30 PM", "4:00 PM"],
                ),
            ],
        }
    }
}

impl Default for StaticProviderDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn doctor(
    id: &str,
    name: &str,
    specialty: &str,
    rating: f32,
    distance: &str,
    address: &str,
    phone: &str,
    slots: &[&str],
) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        rating,
        distance: distance.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        available_slots: slots.iter().map(|s| s.to_string()).collect(),
    }
}

#[async_trait::async_trait]
impl ProviderDirectoryPort for StaticProviderDirectory {
    async fn list_providers(&self) -> Result<Vec<Doctor>, DomainError> {
        Ok(self.doctors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_three_providers_with_slots() {
        let directory = StaticProviderDirectory::new();
        let providers = directory.list_providers().await.unwrap();
        assert_eq!(providers.len(), 3);
        assert_eq!(providers[1].name, "Dr. Michael Chen");
        assert!(providers.iter().all(|d| !d.available_slots.is_empty()));
    }
}
