//! Built-in ESP descriptor table
//!
//! The merge-tag wrapper strings below are the wire contract with each
//! provider's template engine; they must be reproduced byte-for-byte.

use crate::descriptor::{
    EspAuthentication, EspCategory, EspDescriptor, EspFeatures, EspLimits,
};
use crate::merge_tags::MergeTagDialect;
use std::collections::BTreeMap;

const CONTACT_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "company",
    "phone",
    "city",
    "state",
    "country",
];

fn api_key_auth() -> Option<EspAuthentication> {
    Some(EspAuthentication {
        auth_type: "api_key".to_string(),
        required_fields: vec!["api_key".to_string()],
    })
}

fn oauth_auth(fields: &[&str]) -> Option<EspAuthentication> {
    Some(EspAuthentication {
        auth_type: "oauth2".to_string(),
        required_fields: fields.iter().map(|f| f.to_string()).collect(),
    })
}

struct Spec {
    name: &'static str,
    display_name: &'static str,
    category: EspCategory,
    merge_tag_format: &'static str,
    dialect: MergeTagDialect,
    extra_tokens: &'static [&'static str],
    authentication: Option<EspAuthentication>,
    features: EspFeatures,
    limits: Option<EspLimits>,
    endpoints: &'static [(&'static str, &'static str)],
}

fn build(spec: Spec) -> EspDescriptor {
    let mut descriptor = EspDescriptor::new(spec.name, spec.display_name, spec.category);
    descriptor.merge_tag_format = spec.merge_tag_format.to_string();
    descriptor.dialect = spec.dialect;
    descriptor.supported_tokens = CONTACT_FIELDS
        .iter()
        .chain(spec.extra_tokens.iter())
        .map(|t| t.to_string())
        .collect();
    descriptor.authentication = spec.authentication;
    descriptor.features = spec.features;
    descriptor.limits = spec.limits;
    descriptor.api_endpoints = spec
        .endpoints
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<BTreeMap<_, _>>();
    descriptor
}

const FULL_MARKETING: EspFeatures = EspFeatures {
    merge_tags: true,
    dynamic_content: true,
    api_integration: true,
    webhooks: true,
    templates: true,
    segmentation: true,
};

const TRANSACTIONAL: EspFeatures = EspFeatures {
    merge_tags: true,
    dynamic_content: true,
    api_integration: true,
    webhooks: true,
    templates: true,
    segmentation: false,
};

const CRM_BASIC: EspFeatures = EspFeatures {
    merge_tags: true,
    dynamic_content: false,
    api_integration: true,
    webhooks: false,
    templates: true,
    segmentation: true,
};

const MAILBOX_ONLY: EspFeatures = EspFeatures {
    merge_tags: true,
    dynamic_content: false,
    api_integration: true,
    webhooks: false,
    templates: false,
    segmentation: false,
};

/// All built-in provider descriptors, registered at startup.
pub fn builtin_descriptors() -> Vec<EspDescriptor> {
    vec![
        build(Spec {
            name: "mailchimp",
            display_name: "Mailchimp",
            category: EspCategory::Marketing,
            merge_tag_format: "*|TOKEN|*",
            dialect: MergeTagDialect::AsteriskPipe,
            extra_tokens: &["address", "birthday"],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["api_key".to_string(), "server_prefix".to_string()],
            }),
            features: FULL_MARKETING,
            limits: Some(EspLimits {
                max_recipients: Some(2000),
                max_emails_per_hour: Some(10000),
                max_merge_tags: Some(80),
            }),
            endpoints: &[
                ("base", "https://SERVER.api.mailchimp.com/3.0"),
                ("campaigns", "/campaigns"),
            ],
        }),
        build(Spec {
            name: "klaviyo",
            display_name: "Klaviyo",
            category: EspCategory::Marketing,
            merge_tag_format: "{{ person|lookup:'TOKEN' }}",
            dialect: MergeTagDialect::PersonLookup,
            extra_tokens: &["organization", "title"],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: Some(EspLimits {
                max_recipients: None,
                max_emails_per_hour: Some(150000),
                max_merge_tags: Some(100),
            }),
            endpoints: &[("base", "https://a.klaviyo.com/api")],
        }),
        build(Spec {
            name: "sendgrid",
            display_name: "SendGrid",
            category: EspCategory::Transactional,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["subject", "unsubscribe"],
            authentication: api_key_auth(),
            features: TRANSACTIONAL,
            limits: Some(EspLimits {
                max_recipients: Some(1000),
                max_emails_per_hour: None,
                max_merge_tags: None,
            }),
            endpoints: &[("base", "https://api.sendgrid.com/v3"), ("send", "/mail/send")],
        }),
        build(Spec {
            name: "hubspot",
            display_name: "HubSpot",
            category: EspCategory::Crm,
            merge_tag_format: "{{ contact.TOKEN }}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["lifecycle_stage", "owner"],
            authentication: oauth_auth(&["access_token"]),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.hubapi.com")],
        }),
        build(Spec {
            name: "activecampaign",
            display_name: "ActiveCampaign",
            category: EspCategory::Marketing,
            merge_tag_format: "%TOKEN%",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["deal", "account"],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["api_key".to_string(), "api_url".to_string()],
            }),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://ACCOUNT.api-us1.com/api/3")],
        }),
        build(Spec {
            name: "constant_contact",
            display_name: "Constant Contact",
            category: EspCategory::Marketing,
            merge_tag_format: "[[TOKEN]]",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: oauth_auth(&["access_token"]),
            features: FULL_MARKETING,
            limits: Some(EspLimits {
                max_recipients: None,
                max_emails_per_hour: Some(25000),
                max_merge_tags: Some(50),
            }),
            endpoints: &[("base", "https://api.cc.email/v3")],
        }),
        build(Spec {
            name: "postmark",
            display_name: "Postmark",
            category: EspCategory::Transactional,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["action_url", "invoice_id"],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["server_token".to_string()],
            }),
            features: TRANSACTIONAL,
            limits: None,
            endpoints: &[("base", "https://api.postmarkapp.com"), ("send", "/email")],
        }),
        build(Spec {
            name: "mailgun",
            display_name: "Mailgun",
            category: EspCategory::Transactional,
            merge_tag_format: "%recipient.TOKEN%",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["id"],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["api_key".to_string(), "domain".to_string()],
            }),
            features: TRANSACTIONAL,
            limits: Some(EspLimits {
                max_recipients: Some(1000),
                max_emails_per_hour: None,
                max_merge_tags: None,
            }),
            endpoints: &[("base", "https://api.mailgun.net/v3")],
        }),
        build(Spec {
            name: "salesforce",
            display_name: "Salesforce Marketing Cloud",
            category: EspCategory::Crm,
            merge_tag_format: "%%TOKEN%%",
            dialect: MergeTagDialect::DoublePercent,
            extra_tokens: &["subscriber_key", "account_id"],
            authentication: oauth_auth(&["client_id", "client_secret", "refresh_token"]),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://INSTANCE.rest.marketingcloudapis.com")],
        }),
        build(Spec {
            name: "drip",
            display_name: "Drip",
            category: EspCategory::Marketing,
            merge_tag_format: "{{ subscriber.TOKEN }}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["tags"],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.getdrip.com/v2")],
        }),
        build(Spec {
            name: "convertkit",
            display_name: "ConvertKit",
            category: EspCategory::Marketing,
            merge_tag_format: "{{ subscriber.TOKEN }}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["api_secret".to_string()],
            }),
            features: FULL_MARKETING,
            limits: Some(EspLimits {
                max_recipients: None,
                max_emails_per_hour: None,
                max_merge_tags: Some(30),
            }),
            endpoints: &[("base", "https://api.convertkit.com/v3")],
        }),
        build(Spec {
            name: "mailerlite",
            display_name: "MailerLite",
            category: EspCategory::Marketing,
            merge_tag_format: "{$TOKEN}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://connect.mailerlite.com/api")],
        }),
        build(Spec {
            name: "getresponse",
            display_name: "GetResponse",
            category: EspCategory::Marketing,
            merge_tag_format: "[[TOKEN]]",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.getresponse.com/v3")],
        }),
        build(Spec {
            name: "campaign_monitor",
            display_name: "Campaign Monitor",
            category: EspCategory::Marketing,
            merge_tag_format: "[TOKEN,fallback=]",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: Some(EspLimits {
                max_recipients: None,
                max_emails_per_hour: None,
                max_merge_tags: Some(40),
            }),
            endpoints: &[("base", "https://api.createsend.com/api/v3.3")],
        }),
        build(Spec {
            name: "sparkpost",
            display_name: "SparkPost",
            category: EspCategory::Transactional,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: TRANSACTIONAL,
            limits: None,
            endpoints: &[("base", "https://api.sparkpost.com/api/v1")],
        }),
        build(Spec {
            name: "socketlabs",
            display_name: "SocketLabs",
            category: EspCategory::Transactional,
            merge_tag_format: "%%TOKEN%%",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["server_id".to_string(), "api_key".to_string()],
            }),
            features: TRANSACTIONAL,
            limits: None,
            endpoints: &[("base", "https://inject.socketlabs.com/api/v1")],
        }),
        build(Spec {
            name: "sendinblue",
            display_name: "Brevo (Sendinblue)",
            category: EspCategory::Marketing,
            merge_tag_format: "{{ contact.TOKEN }}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.brevo.com/v3")],
        }),
        build(Spec {
            name: "zoho",
            display_name: "Zoho Campaigns",
            category: EspCategory::Crm,
            merge_tag_format: "$[TOKEN]$",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["lead_source"],
            authentication: oauth_auth(&["access_token"]),
            features: CRM_BASIC,
            limits: None,
            endpoints: &[("base", "https://campaigns.zoho.com/api/v1.1")],
        }),
        build(Spec {
            name: "pipedrive",
            display_name: "Pipedrive",
            category: EspCategory::Crm,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Handlebars,
            extra_tokens: &["deal_title", "pipeline"],
            authentication: api_key_auth(),
            features: CRM_BASIC,
            limits: None,
            endpoints: &[("base", "https://api.pipedrive.com/v1")],
        }),
        build(Spec {
            name: "gmail",
            display_name: "Gmail",
            category: EspCategory::Transactional,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Handlebars,
            extra_tokens: &[],
            authentication: oauth_auth(&["access_token"]),
            features: MAILBOX_ONLY,
            limits: Some(EspLimits {
                max_recipients: Some(500),
                max_emails_per_hour: Some(500),
                max_merge_tags: None,
            }),
            endpoints: &[("base", "https://gmail.googleapis.com/gmail/v1")],
        }),
        build(Spec {
            name: "outlook",
            display_name: "Outlook",
            category: EspCategory::Transactional,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Handlebars,
            extra_tokens: &[],
            authentication: oauth_auth(&["access_token"]),
            features: MAILBOX_ONLY,
            limits: Some(EspLimits {
                max_recipients: Some(500),
                max_emails_per_hour: Some(10000),
                max_merge_tags: None,
            }),
            endpoints: &[("base", "https://graph.microsoft.com/v1.0")],
        }),
        build(Spec {
            name: "omnisend",
            display_name: "Omnisend",
            category: EspCategory::Marketing,
            merge_tag_format: "[[TOKEN]]",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["cart_url"],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.omnisend.com/v3")],
        }),
        build(Spec {
            name: "really_simple_systems",
            display_name: "Really Simple Systems",
            category: EspCategory::Crm,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Handlebars,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: CRM_BASIC,
            limits: None,
            endpoints: &[("base", "https://api.reallysimplesystems.com")],
        }),
        build(Spec {
            name: "moosend",
            display_name: "Moosend",
            category: EspCategory::Marketing,
            merge_tag_format: "#TOKEN#",
            dialect: MergeTagDialect::Template,
            extra_tokens: &[],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.moosend.com/v3")],
        }),
        build(Spec {
            name: "customer_io",
            display_name: "Customer.io",
            category: EspCategory::Marketing,
            merge_tag_format: "{{customer.TOKEN}}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["segment"],
            authentication: Some(EspAuthentication {
                auth_type: "api_key".to_string(),
                required_fields: vec!["site_id".to_string(), "api_key".to_string()],
            }),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://track.customer.io/api/v1")],
        }),
        build(Spec {
            name: "iterable",
            display_name: "Iterable",
            category: EspCategory::Marketing,
            merge_tag_format: "{{TOKEN}}",
            dialect: MergeTagDialect::Template,
            extra_tokens: &["user_id"],
            authentication: api_key_auth(),
            features: FULL_MARKETING,
            limits: None,
            endpoints: &[("base", "https://api.iterable.com/api")],
        }),
    ]
}
