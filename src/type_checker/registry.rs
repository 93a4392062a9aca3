//! Symbol registry and scope tree.
//!
//! The registry owns every scope, symbol and function signature created
//! during one checking run. Scopes live in an arena and refer to their
//! parent by [`ScopeId`]; tree nodes refer back into the registry through
//! the same handles, so nothing in the tree borrows from the registry.

use std::collections::HashMap;

use crate::{
    ast::types::{BasicType, Type},
    errors::errors::ErrorImpl,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(pub usize);

/// A declared variable, constant or parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub is_constant: bool,
    pub is_initialized: bool,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Symbol {
            name: name.into(),
            ty,
            is_constant: false,
            is_initialized: false,
        }
    }

    pub fn constant(name: impl Into<String>, ty: Type) -> Self {
        Symbol {
            name: name.into(),
            ty,
            is_constant: true,
            is_initialized: true,
        }
    }

    /// Parameters always arrive initialized by the caller.
    pub fn parameter(name: impl Into<String>, ty: Type) -> Self {
        Symbol {
            name: name.into(),
            ty,
            is_constant: false,
            is_initialized: true,
        }
    }

    pub fn is_valid_lvalue(&self) -> bool {
        !self.is_constant
    }
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    variables: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn get_variable(&self, name: &str) -> Option<SymbolId> {
        self.variables.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    /// A scalar; `Void` allowed.
    pub return_type: Type,
    pub parameters: Vec<Parameter>,
    pub is_builtin: bool,
}

#[derive(Debug, Default)]
pub struct SymbolRegistry {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    functions: Vec<FunctionSignature>,
    function_lookup: HashMap<String, FunctionId>,
    global: Option<ScopeId>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            id,
            parent,
            variables: HashMap::new(),
        });
        id
    }

    /// Allocates the root scope. Called once per checking run; later calls
    /// hand back the existing root.
    pub fn create_global_scope(&mut self) -> ScopeId {
        if let Some(global) = self.global {
            return global;
        }

        let global = self.push_scope(None);
        self.global = Some(global);
        global
    }

    pub fn global_scope(&self) -> Option<ScopeId> {
        self.global
    }

    /// Allocates a child of `parent`. Does not change which scope is current.
    pub fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.push_scope(Some(parent))
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn function(&self, id: FunctionId) -> &FunctionSignature {
        &self.functions[id.0]
    }

    pub fn functions(&self) -> &[FunctionSignature] {
        &self.functions
    }

    /// Registers `symbol` under `name` in exactly `scope`.
    ///
    /// Shadowing a name from an enclosing scope is allowed. In the global
    /// scope, names are shared with functions.
    pub fn register_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        symbol: Symbol,
    ) -> Result<SymbolId, ErrorImpl> {
        let collides_with_function =
            Some(scope) == self.global && self.function_lookup.contains_key(name);

        if collides_with_function || self.scopes[scope.0].variables.contains_key(name) {
            return Err(ErrorImpl::DuplicateSymbol {
                name: name.to_string(),
            });
        }

        let id = SymbolId(self.symbols.len());
        self.symbols.push(symbol);
        self.scopes[scope.0].variables.insert(name.to_string(), id);

        tracing::trace!(name, scope = scope.0, symbol = id.0, "registered variable");
        Ok(id)
    }

    /// Resolves `name` from `scope` outwards; the nearest declaration wins.
    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Result<SymbolId, ErrorImpl> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(symbol) = scope.get_variable(name) {
                return Ok(symbol);
            }
            current = scope.parent;
        }

        Err(ErrorImpl::UndeclaredSymbol {
            name: name.to_string(),
        })
    }

    /// Declares a function with no parameters yet; see [`Self::add_parameter`].
    pub fn new_function(
        &mut self,
        name: &str,
        return_type: BasicType,
    ) -> Result<FunctionId, ErrorImpl> {
        let collides_with_global = self
            .global
            .map(|global| self.scopes[global.0].variables.contains_key(name))
            .unwrap_or(false);

        if collides_with_global || self.function_lookup.contains_key(name) {
            return Err(ErrorImpl::DuplicateSymbol {
                name: name.to_string(),
            });
        }

        let id = FunctionId(self.functions.len());
        self.functions.push(FunctionSignature {
            name: name.to_string(),
            return_type: Type::scalar(return_type),
            parameters: vec![],
            is_builtin: false,
        });
        self.function_lookup.insert(name.to_string(), id);

        tracing::trace!(name, function = id.0, "registered function");
        Ok(id)
    }

    pub fn add_parameter(&mut self, function: FunctionId, parameter: Parameter) {
        self.functions[function.0].parameters.push(parameter);
    }

    pub fn lookup_function(&self, name: &str) -> Result<FunctionId, ErrorImpl> {
        self.function_lookup
            .get(name)
            .copied()
            .ok_or_else(|| ErrorImpl::UndeclaredFunction {
                name: name.to_string(),
            })
    }

    /// Registers the runtime library's I/O functions.
    pub fn register_builtins(&mut self) -> Result<(), ErrorImpl> {
        let builtins = [
            ("print_int", BasicType::Void, Some(BasicType::Int32)),
            ("print_float", BasicType::Void, Some(BasicType::Float)),
            ("print_double", BasicType::Void, Some(BasicType::Double)),
            ("print_bool", BasicType::Void, Some(BasicType::Bool)),
            ("get_int", BasicType::Int32, None),
            ("get_float", BasicType::Float, None),
            ("get_double", BasicType::Double, None),
        ];

        for (name, return_type, parameter) in builtins {
            let id = self.new_function(name, return_type)?;
            self.functions[id.0].is_builtin = true;
            if let Some(parameter) = parameter {
                self.add_parameter(
                    id,
                    Parameter {
                        name: String::from("value"),
                        ty: Type::scalar(parameter),
                    },
                );
            }
        }

        Ok(())
    }
}
