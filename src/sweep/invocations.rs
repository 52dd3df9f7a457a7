//! Example program invocations
//!
//! Maps an example directory name to the argument string it is launched with. Arguments are
//! templates over the operator's cluster endpoints: `{servers}` for the bootstrap servers and
//! `{schema_registry}` for the schema-registry URL.

use crate::core::config::ExampleEntry;
use crate::core::error::{ConfigError, RunbookResult};
use std::collections::{BTreeMap, BTreeSet};

/// Built-in invocation table, one entry per example
pub const BUILTIN: &[(&str, &str)] = &[
  ("admin_alter_consumer_group_offsets", "{servers} myGroup myTopic 0 10"),
  ("admin_create_acls", "{servers} TOPIC topic1 LITERAL principal1 host1 ALL ALLOW"),
  ("admin_create_topic", "{servers} myTopic 10 1"),
  ("admin_delete_acls", "{servers} TOPIC myTopic LITERAL principal host1 ALL ALLOW"),
  ("admin_delete_consumer_groups", "{servers} 30 myGroup"),
  ("admin_delete_topics", "{servers} myTopic"),
  ("admin_describe_acls", "{servers} TOPIC myTopic LITERAL milind milind ALL ALLOW"),
  ("admin_describe_config", "{servers} TOPIC test"),
  ("admin_describe_consumer_groups", "{servers} myGroup"),
  ("admin_list_consumer_group_offsets", "{servers} myGroup false test4 0"),
  ("admin_list_consumer_groups", "{servers}"),
  ("avro_generic_consumer_example", "{servers} '{schema_registry}' myGroup test4"),
  ("avro_generic_producer_example", "{servers} '{schema_registry}' test4"),
  ("avro_specific_consumer_example", "{servers} '{schema_registry}' myGroup test4"),
  ("avro_specific_producer_example", "{servers} '{schema_registry}' test4"),
  ("consumer_channel_example", "{servers} myGroup3 test4 "),
  ("consumer_example", "{servers} myGroup test4"),
  ("consumer_offset_metadata", "{servers} myGroup2 test4 0 0 'x'"),
  ("cooperative_consumer_example", "{servers} myGroup2 test4"),
  ("go-kafkacat", "--broker {servers} consume --group=myGroup3 test4"),
  ("idempotent_producer_example", "{servers} test4"),
  ("json_consumer_example", "{servers} 'http://localhost:8081' myGroup3 test5"),
  ("json_producer_example", "{servers} 'http://localhost:8081' test5"),
  ("library-version", ""),
  ("mockcluster_example", ""),
  ("producer_channel_example", "{servers} test5"),
  ("producer_custom_channel_example", "{servers} test4"),
  ("producer_example", "{servers} test5"),
  ("protobuf_consumer_example", "{servers} 'http://localhost:8081' myGroup4 test4"),
  ("protobuf_producer_example", "{servers} 'http://localhost:8081' test4"),
  ("stats_example", "{servers} myGroup test4"),
  ("transactions_example", "{servers}"),
];

/// Cluster endpoints collected from the operator before the sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub servers: String,
  pub schema_registry: String,
}

impl Endpoints {
  fn render(&self, template: &str) -> String {
    template
      .replace("{servers}", &self.servers)
      .replace("{schema_registry}", &self.schema_registry)
  }
}

/// Resolved argument strings by example name
#[derive(Debug, Clone, Default)]
pub struct ExampleInvocations {
  args: BTreeMap<String, String>,
}

impl ExampleInvocations {
  /// Build from `(name, template)` pairs; a name listed twice is rejected, never shadowed
  pub fn from_pairs<'e, I>(pairs: I, endpoints: &Endpoints) -> RunbookResult<Self>
  where
    I: IntoIterator<Item = (&'e str, &'e str)>,
  {
    let pairs: Vec<_> = pairs.into_iter().collect();
    let duplicates = duplicate_names(pairs.iter().map(|(name, _)| *name));
    if !duplicates.is_empty() {
      return Err(ConfigError::DuplicateExamples { names: duplicates }.into());
    }

    let args = pairs
      .into_iter()
      .map(|(name, template)| (name.to_string(), endpoints.render(template)))
      .collect();
    Ok(Self { args })
  }

  /// Configured entries, or the built-in table when none are configured
  pub fn resolve(entries: &[ExampleEntry], endpoints: &Endpoints) -> RunbookResult<Self> {
    if entries.is_empty() {
      Self::from_pairs(BUILTIN.iter().copied(), endpoints)
    } else {
      Self::from_pairs(entries.iter().map(|e| (e.name.as_str(), e.args.as_str())), endpoints)
    }
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.args.get(name).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.args.len()
  }
}

/// Names occurring more than once, sorted
pub fn duplicate_names<'e, I>(names: I) -> Vec<String>
where
  I: IntoIterator<Item = &'e str>,
{
  let mut seen = BTreeSet::new();
  let mut repeated = BTreeSet::new();
  for name in names {
    if !seen.insert(name) {
      repeated.insert(name.to_string());
    }
  }
  repeated.into_iter().collect()
}
