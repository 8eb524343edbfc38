//! Risk scoring — per-kind heuristics assigning `risk_score` and
//! `criticality` at node construction time.
//!
//! Scores are additive (base per kind + property deltas), deterministic for
//! identical input, and clamped to `[0, 100]`. The tables are a hand-tuned
//! starting configuration, not externally validated ground truth:
//!
//! | Kind | Base | Deltas |
//! |---|---|---|
//! | `iam_user` | 35 | admin policy +30, MFA disabled +10, ≥2 access keys +10, inline wildcard +10 |
//! | `iam_role` | 40 | trusted by root +25, admin policy +25, wildcard trust +20, external-account trust +10 |
//! | `compute_instance` | 30 | public IP +30, open ingress +15, production tag +10 |
//! | `storage_bucket` | 30 | sensitive data +35, confidential tag +15, public access +30, unencrypted +15, versioning off +5 |
//! | `serverless_function` | 35 | env variables +15, wildcard data scope +10, public URL +25, no VPC +10 |
//! | `managed_database` | 40 | publicly accessible +30, unencrypted +15, PII +15, deletion protection off +5 |
//! | `kms_key` | 45 | rotation disabled +10, wildcard key policy +25 |
//! | `secret` | 50 | rotation disabled +15, broad read access +25 |
//! | `virtual_network` | 20 | default VPC +10, flow logs off +10, external peering +15 |
//! | `subnet` | 15 | auto-assign public IP +20, internet gateway route +15 |
//!
//! Criticality: score ≥85 → Critical, ≥70 → High, ≥50 → Medium, else Low.
//! Two type-specific overrides: buckets holding sensitive data are always
//! Critical; secrets are always at least High.

use vantage_core::types::{
    BucketRecord, Criticality, DataStoreKind, DataStoreRecord, FunctionRecord, IdentityRecord,
    InstanceRecord, PrincipalKind,
};

pub const THRESHOLD_CRITICAL: f64 = 85.0;
pub const THRESHOLD_HIGH: f64 = 70.0;
pub const THRESHOLD_MEDIUM: f64 = 50.0;

/// Policies granting administrator-equivalent access across providers.
const ADMIN_POLICIES: &[&str] = &["AdministratorAccess", "roles/owner", "Owner"];

/// Map a score onto the default criticality thresholds.
pub fn tier(score: f64) -> Criticality {
    if score >= THRESHOLD_CRITICAL {
        Criticality::Critical
    } else if score >= THRESHOLD_HIGH {
        Criticality::High
    } else if score >= THRESHOLD_MEDIUM {
        Criticality::Medium
    } else {
        Criticality::Low
    }
}

fn has_admin_policy(policies: &[String]) -> bool {
    policies.iter().any(|p| {
        ADMIN_POLICIES
            .iter()
            .any(|admin| p == admin || p.ends_with(&format!("/{admin}")))
    })
}

pub fn score_identity(record: &IdentityRecord) -> (f64, Criticality) {
    let mut score: f64 = match record.kind {
        PrincipalKind::User => 35.0,
        PrincipalKind::Role => 40.0,
    };

    if has_admin_policy(&record.attached_policies) {
        score += match record.kind {
            PrincipalKind::User => 30.0,
            PrincipalKind::Role => 25.0,
        };
    }

    match record.kind {
        PrincipalKind::User => {
            if !record.mfa_enabled {
                score += 10.0;
            }
            if record.access_key_count >= 2 {
                score += 10.0;
            }
            if record.inline_wildcard {
                score += 10.0;
            }
        }
        PrincipalKind::Role => {
            if record.trusted_root {
                score += 25.0;
            }
            if record.wildcard_trust {
                score += 20.0;
            }
            if !record.external_trust_accounts.is_empty() {
                score += 10.0;
            }
        }
    }

    let score = score.clamp(0.0, 100.0);
    (score, tier(score))
}

pub fn score_instance(record: &InstanceRecord) -> (f64, Criticality) {
    let mut score: f64 = 30.0;

    if record.public_ip.is_some() {
        score += 30.0;
    }
    if record.open_ingress {
        score += 15.0;
    }
    let production = record
        .tags
        .get("Environment")
        .is_some_and(|v| v.eq_ignore_ascii_case("production"));
    if production {
        score += 10.0;
    }

    let score = score.clamp(0.0, 100.0);
    (score, tier(score))
}

pub fn score_bucket(record: &BucketRecord) -> (f64, Criticality) {
    let mut score: f64 = 30.0;

    if record.sensitive_data {
        score += 35.0;
    }
    let confidential = record
        .tags
        .get("Classification")
        .is_some_and(|v| v.eq_ignore_ascii_case("confidential"));
    if confidential {
        score += 15.0;
    }
    if record.public_access {
        score += 30.0;
    }
    if record.encryption.is_none() {
        score += 15.0;
    }
    if !record.versioning {
        score += 5.0;
    }

    let score = score.clamp(0.0, 100.0);
    // Sensitive buckets are always business-critical no matter the score.
    let criticality = if record.sensitive_data {
        Criticality::Critical
    } else {
        tier(score)
    };
    (score, criticality)
}

pub fn score_function(record: &FunctionRecord) -> (f64, Criticality) {
    let mut score: f64 = 35.0;

    if !record.environment.is_empty() {
        score += 15.0;
    }
    let wildcard_scope = record
        .data_access
        .iter()
        .any(|grant| grant.action.ends_with('*'));
    if wildcard_scope {
        score += 10.0;
    }
    if record.public_url {
        score += 25.0;
    }
    if record.vpc_subnets.is_empty() {
        score += 10.0;
    }

    let score = score.clamp(0.0, 100.0);
    (score, tier(score))
}

pub fn score_data_store(record: &DataStoreRecord) -> (f64, Criticality) {
    let mut score: f64 = match record.kind {
        DataStoreKind::ManagedDatabase => 40.0,
        DataStoreKind::KmsKey => 45.0,
        DataStoreKind::Secret => 50.0,
    };

    match record.kind {
        DataStoreKind::ManagedDatabase => {
            if record.publicly_accessible {
                score += 30.0;
            }
            if !record.encrypted {
                score += 15.0;
            }
            if record.pii {
                score += 15.0;
            }
            if !record.deletion_protection {
                score += 5.0;
            }
        }
        DataStoreKind::KmsKey => {
            if !record.rotation_enabled {
                score += 10.0;
            }
            if record.wildcard_policy {
                score += 25.0;
            }
        }
        DataStoreKind::Secret => {
            if !record.rotation_enabled {
                score += 15.0;
            }
            if record.broad_read_access {
                score += 25.0;
            }
        }
    }

    let score = score.clamp(0.0, 100.0);
    // Secrets are credential material: never below High.
    let criticality = match record.kind {
        DataStoreKind::Secret => tier(score).max(Criticality::High),
        _ => tier(score),
    };
    (score, criticality)
}

pub fn score_virtual_network(
    is_default: bool,
    flow_logs_enabled: bool,
    peered_accounts: &[String],
) -> (f64, Criticality) {
    let mut score: f64 = 20.0;

    if is_default {
        score += 10.0;
    }
    if !flow_logs_enabled {
        score += 10.0;
    }
    if !peered_accounts.is_empty() {
        score += 15.0;
    }

    let score = score.clamp(0.0, 100.0);
    (score, tier(score))
}

pub fn score_subnet(auto_public_ip: bool, internet_gateway_route: bool) -> (f64, Criticality) {
    let mut score: f64 = 15.0;

    if auto_public_ip {
        score += 20.0;
    }
    if internet_gateway_route {
        score += 15.0;
    }

    let score = score.clamp(0.0, 100.0);
    (score, tier(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vantage_core::types::ResourceGrant;

    fn admin_role() -> IdentityRecord {
        IdentityRecord {
            principal_id: "arn:aws:iam::123456789012:role/AdminRole".to_string(),
            kind: PrincipalKind::Role,
            name: "AdminRole".to_string(),
            attached_policies: vec!["AdministratorAccess".to_string()],
            inline_wildcard: false,
            mfa_enabled: false,
            access_key_count: 0,
            trusted_root: true,
            wildcard_trust: false,
            external_trust_accounts: vec![],
            assumable_by: vec![],
        }
    }

    #[test]
    fn root_trusted_admin_role_scores_90_critical() {
        let (score, criticality) = score_identity(&admin_role());
        assert_eq!(score, 90.0);
        assert_eq!(criticality, Criticality::Critical);
    }

    #[test]
    fn admin_user_without_mfa_scores_85_critical() {
        let record = IdentityRecord {
            principal_id: "arn:aws:iam::123456789012:user/AdminUser".to_string(),
            kind: PrincipalKind::User,
            name: "AdminUser".to_string(),
            attached_policies: vec!["AdministratorAccess".to_string()],
            inline_wildcard: false,
            mfa_enabled: false,
            access_key_count: 2,
            trusted_root: false,
            wildcard_trust: false,
            external_trust_accounts: vec![],
            assumable_by: vec![],
        };
        let (score, criticality) = score_identity(&record);
        assert_eq!(score, 85.0);
        assert_eq!(criticality, Criticality::Critical);
    }

    #[test]
    fn public_production_instance_scores_70_high() {
        let mut tags = BTreeMap::new();
        tags.insert("Environment".to_string(), "production".to_string());
        let record = InstanceRecord {
            instance_id: "i-1".to_string(),
            name: "web-server-1".to_string(),
            region: "us-east-1".to_string(),
            instance_type: "t3.large".to_string(),
            public_ip: Some("54.123.45.67".to_string()),
            open_ingress: false,
            security_groups: vec!["sg-1".to_string()],
            instance_profile_role: None,
            managed_by: vec![],
            tags,
        };
        let (score, criticality) = score_instance(&record);
        assert_eq!(score, 70.0);
        assert_eq!(criticality, Criticality::High);
    }

    #[test]
    fn sensitive_private_bucket_scores_80_and_overrides_to_critical() {
        let mut tags = BTreeMap::new();
        tags.insert("Classification".to_string(), "Confidential".to_string());
        let record = BucketRecord {
            bucket_id: "arn:aws:s3:::customer-data".to_string(),
            name: "customer-data".to_string(),
            region: "us-east-1".to_string(),
            encryption: Some("AES-256".to_string()),
            versioning: true,
            public_access: false,
            sensitive_data: true,
            tags,
            readers: vec![],
        };
        let (score, criticality) = score_bucket(&record);
        assert_eq!(score, 80.0);
        assert_eq!(criticality, Criticality::Critical);
    }

    #[test]
    fn function_with_env_and_wildcard_scope_scores_60_medium() {
        let record = FunctionRecord {
            function_id: "arn:aws:lambda:us-east-1:123456789012:function:data-processor"
                .to_string(),
            name: "data-processor".to_string(),
            region: "us-east-1".to_string(),
            runtime: "python3.9".to_string(),
            memory_mb: 512,
            timeout_secs: 300,
            environment: vec!["DB_PASSWORD".to_string()],
            vpc_subnets: vec!["subnet-1".to_string()],
            public_url: false,
            execution_role: None,
            invokers: vec![],
            data_access: vec![ResourceGrant {
                resource_id: "arn:aws:s3:::customer-data".to_string(),
                action: "s3:*".to_string(),
            }],
        };
        let (score, criticality) = score_function(&record);
        assert_eq!(score, 60.0);
        assert_eq!(criticality, Criticality::Medium);
    }

    #[test]
    fn secret_never_falls_below_high() {
        let record = DataStoreRecord {
            resource_id: "arn:aws:secretsmanager:us-east-1:1:secret:db".to_string(),
            kind: DataStoreKind::Secret,
            name: "db".to_string(),
            region: "us-east-1".to_string(),
            publicly_accessible: false,
            encrypted: true,
            pii: false,
            deletion_protection: false,
            rotation_enabled: true,
            wildcard_policy: false,
            broad_read_access: false,
            readers: vec![],
        };
        let (score, criticality) = score_data_store(&record);
        assert_eq!(score, 50.0);
        assert_eq!(criticality, Criticality::High);
    }

    #[test]
    fn scores_clamp_to_range() {
        let mut record = admin_role();
        record.wildcard_trust = true;
        record.external_trust_accounts = vec!["999999999999".to_string()];
        let (score, criticality) = score_identity(&record);
        assert_eq!(score, 100.0);
        assert_eq!(criticality, Criticality::Critical);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier(85.0), Criticality::Critical);
        assert_eq!(tier(84.9), Criticality::High);
        assert_eq!(tier(70.0), Criticality::High);
        assert_eq!(tier(69.9), Criticality::Medium);
        assert_eq!(tier(50.0), Criticality::Medium);
        assert_eq!(tier(49.9), Criticality::Low);
        assert_eq!(tier(0.0), Criticality::Low);
    }
}
