//! Capability registry
//!
//! Each descriptor variant declares its invokable operations as a static
//! [`Verb`] list through [`Capabilities`]. [`verbs_for`] turns that list into
//! a [`CommandSet`] bound to one descriptor. Invocation errors are returned to
//! the caller untouched.

use crate::descriptor::{
    ActionSetting, Descriptor, GenericSetting, ListSetting, ValueSetting,
};
use crate::error::{ModelError, StoreError};
use indexmap::IndexMap;
use std::fmt::{self, Debug, Formatter};

/// Operation handle invoked without arguments
pub type VerbFn<S> = fn(&S) -> Result<(), StoreError>;

/// Named, parameterless operation declared by a descriptor type
pub struct Verb<S: 'static> {
    /// Display name of the command
    pub name: &'static str,
    /// Operation to call
    pub call: VerbFn<S>,
}

/// Compile-time list of a descriptor type's invokable operations
pub trait Capabilities: Sized + 'static {
    /// Verbs in display order
    const VERBS: &'static [Verb<Self>] = &[];
}

impl<T: 'static> Capabilities for ValueSetting<T> {}

impl Capabilities for ListSetting {}

impl Capabilities for GenericSetting {}

impl Capabilities for ActionSetting {
    const VERBS: &'static [Verb<Self>] = &[Verb {
        name: "Invoke",
        call: ActionSetting::invoke,
    }];
}

/// One verb bound to a descriptor
pub struct Command<'a> {
    name: &'static str,
    action: Box<dyn Fn() -> Result<(), StoreError> + 'a>,
}

impl<'a> Command<'a> {
    fn bind<S: Capabilities>(verb: &Verb<S>, target: &'a S) -> Self {
        let call = verb.call;
        Self {
            name: verb.name,
            action: Box::new(move || call(target)),
        }
    }

    /// Command name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the underlying operation
    ///
    /// # Errors
    /// Returns whatever the operation returned
    pub fn invoke(&self) -> Result<(), StoreError> {
        (self.action)()
    }
}

impl Debug for Command<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Ordered, name-addressable set of commands for one descriptor
#[derive(Debug)]
pub struct CommandSet<'a> {
    id: String,
    commands: IndexMap<&'static str, Command<'a>>,
}

impl<'a> CommandSet<'a> {
    fn from_target<S: Capabilities>(id: String, target: &'a S) -> Self {
        let commands = S::VERBS
            .iter()
            .map(|verb| (verb.name, Command::bind(verb, target)))
            .collect();
        Self { id, commands }
    }

    /// Command names in declaration order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// Look up a command by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Command<'a>> {
        self.commands.get(name)
    }

    /// Invoke a command by name
    ///
    /// # Errors
    /// - [`ModelError::UnknownVerb`] if no command has that name
    /// - [`ModelError::Store`] if the operation fails
    pub fn invoke(&self, name: &str) -> Result<(), ModelError> {
        let command = self.get(name).ok_or_else(|| ModelError::UnknownVerb {
            id: self.id.clone(),
            verb: name.to_string(),
        })?;
        command.invoke()?;
        Ok(())
    }

    /// Iterate over commands in order
    pub fn iter(&self) -> impl Iterator<Item = &Command<'a>> {
        self.commands.values()
    }

    /// Number of commands
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if there are no commands
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Commands declared by the descriptor's variant, bound to it
///
/// Rebuilt on every call; nothing is cached.
#[must_use]
pub fn verbs_for(descriptor: &Descriptor) -> CommandSet<'_> {
    let id = descriptor.id().to_string();
    match descriptor {
        Descriptor::Boolean(s) => CommandSet::from_target(id, s),
        Descriptor::Range(s) => CommandSet::from_target(id, s),
        Descriptor::List(s) => CommandSet::from_target(id, s),
        Descriptor::Action(s) => CommandSet::from_target(id, s),
        Descriptor::Generic(s) => CommandSet::from_target(id, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::DescriptorFactory;
    use crate::kind::Kind;
    use crate::store::MockSettingsStore;
    use settings_tree::Identifier;
    use std::sync::Arc;

    fn descriptor(kind: Kind, store: MockSettingsStore) -> Descriptor {
        DescriptorFactory::new(Arc::new(store)).create(Identifier::new("A_B").unwrap(), kind)
    }

    #[test]
    fn action_declares_invoke() {
        assert_eq!(ActionSetting::VERBS.len(), 1);
        assert_eq!(ActionSetting::VERBS[0].name, "Invoke");
    }

    #[test]
    fn value_kinds_declare_nothing() {
        for kind in [Kind::Boolean, Kind::Range, Kind::List, Kind::Generic] {
            let descriptor = descriptor(kind, MockSettingsStore::new());
            assert!(verbs_for(&descriptor).is_empty(), "{kind}");
        }
    }

    #[test]
    fn invoke_calls_through() {
        let mut store = MockSettingsStore::new();
        store.expect_invoke_action().times(2).returning(|_| Ok(()));
        let descriptor = descriptor(Kind::Action, store);

        let verbs = verbs_for(&descriptor);
        assert_eq!(verbs.names(), vec!["Invoke"]);
        verbs.get("Invoke").unwrap().invoke().unwrap();
        verbs.invoke("Invoke").unwrap();
    }

    #[test]
    fn invoke_errors_are_not_caught() {
        let mut store = MockSettingsStore::new();
        store
            .expect_invoke_action()
            .returning(|id| Err(StoreError::invocation(id, "device busy")));
        let descriptor = descriptor(Kind::Action, store);

        let err = verbs_for(&descriptor).invoke("Invoke").unwrap_err();
        assert!(matches!(err, ModelError::Store(StoreError::InvocationFailure { .. })));
    }

    #[test]
    fn unknown_verb() {
        let descriptor = descriptor(Kind::Boolean, MockSettingsStore::new());
        let err = descriptor.verbs().invoke("Invoke").unwrap_err();
        assert!(matches!(err, ModelError::UnknownVerb { ref verb, .. } if verb == "Invoke"));
    }

    #[test]
    fn rebuilt_per_query() {
        let descriptor = descriptor(Kind::Action, MockSettingsStore::new());
        let first = verbs_for(&descriptor);
        let second = verbs_for(&descriptor);
        assert_eq!(first.names(), second.names());
    }
}
