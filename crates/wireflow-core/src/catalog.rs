//! The catalog of constructible box types.
//!
//! A [`Catalog`] is an explicit registry mapping a type name to its
//! [`BoxType`], constructed once at process start and injected into whatever
//! owns a graph. There is no global registration -- catalogs are plain
//! values, swappable per test.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::boxtype::BoxType;
use crate::error::GraphError;
use crate::instance::BoxInstance;
use crate::value::ParamValues;

/// Registry of all box types available to one session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    types: IndexMap<String, Arc<BoxType>>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            types: IndexMap::new(),
        }
    }

    /// Registers a box type under its declared name.
    ///
    /// Returns [`GraphError::DuplicateTypeName`] if the name is taken.
    pub fn register(&mut self, boxtype: BoxType) -> Result<(), GraphError> {
        let name = boxtype.name().to_string();
        if self.types.contains_key(&name) {
            return Err(GraphError::DuplicateTypeName { name });
        }
        self.types.insert(name, Arc::new(boxtype));
        Ok(())
    }

    /// Looks up a box type by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<BoxType>> {
        self.types.get(name).cloned()
    }

    /// Constructs a live box of the named type.
    ///
    /// The box starts from the type's declared defaults; `params` is then
    /// applied as a validated delta. Fails with [`GraphError::UnknownBoxType`]
    /// for an unregistered type name, or [`GraphError::InvalidParameter`]
    /// when the delta is rejected.
    pub fn instantiate(
        &self,
        type_name: &str,
        box_name: &str,
        params: &ParamValues,
    ) -> Result<BoxInstance, GraphError> {
        let boxtype = self.lookup(type_name).ok_or_else(|| GraphError::UnknownBoxType {
            name: type_name.to_string(),
        })?;
        let mut instance = BoxInstance::new(boxtype, box_name);
        instance.set_params(params)?;
        Ok(instance)
    }

    /// All registered types, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BoxType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
