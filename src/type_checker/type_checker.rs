use crate::{
    ast::{
        ast::{CompUnit, Item, NodeId},
        statements::{Decl, DimLiteral, FuncDef, FuncParam, VarDef},
        types::{BasicType, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    initializer::check_initializer,
    registry::{FunctionId, Parameter, ScopeId, Symbol, SymbolRegistry},
    stmt::check_block,
};

/// Switches for one checking run.
#[derive(Debug, Clone)]
pub struct TypeCheckOptions {
    /// Pre-declare the runtime I/O functions (`print_int`, `get_int`, ...).
    pub register_builtins: bool,
}

impl Default for TypeCheckOptions {
    fn default() -> Self {
        TypeCheckOptions {
            register_builtins: true,
        }
    }
}

/// Transient state of the walk: where we are, not what we found.
#[derive(Debug, Clone)]
pub struct CheckingContext {
    pub current_scope: ScopeId,
    pub current_function: Option<FunctionId>,
    /// Identities of the enclosing `while` statements, innermost last.
    pub loop_stack: Vec<NodeId>,
}

impl CheckingContext {
    pub fn new(global: ScopeId) -> Self {
        CheckingContext {
            current_scope: global,
            current_function: None,
            loop_stack: vec![],
        }
    }
}

#[derive(Debug, Default)]
pub struct TypeChecker {
    pub registry: SymbolRegistry,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` inside a fresh child of the current scope.
    ///
    /// The previous scope is current again when this returns, whether `f`
    /// succeeded or not.
    pub fn in_scope<T, F>(&mut self, ctx: &mut CheckingContext, f: F) -> Result<(ScopeId, T), Error>
    where
        F: FnOnce(&mut TypeChecker, &mut CheckingContext) -> Result<T, Error>,
    {
        let previous = ctx.current_scope;
        let scope = self.registry.new_scope(previous);
        tracing::trace!(scope = scope.0, parent = previous.0, "enter scope");

        ctx.current_scope = scope;
        let result = f(self, ctx);
        ctx.current_scope = previous;

        tracing::trace!(scope = scope.0, "leave scope");
        result.map(|value| (scope, value))
    }

    /// Runs `f` with `function` as the enclosing function.
    pub fn in_function<T, F>(
        &mut self,
        ctx: &mut CheckingContext,
        function: FunctionId,
        f: F,
    ) -> Result<T, Error>
    where
        F: FnOnce(&mut TypeChecker, &mut CheckingContext) -> Result<T, Error>,
    {
        let previous = ctx.current_function.replace(function);
        let result = f(self, ctx);
        ctx.current_function = previous;
        result
    }

    /// Runs `f` with the while statement `loop_id` pushed on the loop stack.
    pub fn in_loop<T, F>(&mut self, ctx: &mut CheckingContext, loop_id: NodeId, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut TypeChecker, &mut CheckingContext) -> Result<T, Error>,
    {
        ctx.loop_stack.push(loop_id);
        let result = f(self, ctx);
        ctx.loop_stack.pop();
        result
    }
}

/// Parses the text of an integer literal: decimal, octal (`0...`) or
/// hexadecimal (`0x...`), with an optional leading `-`.
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };

    Some(if negative { -value } else { value })
}

fn dimension(literal: &DimLiteral, node: NodeId) -> Result<u32, Error> {
    let invalid = || {
        Error::at_node(
            ErrorImpl::InvalidArrayDimension {
                dimension: literal.text.clone(),
            },
            node,
            &literal.span,
        )
    };

    match parse_integer_literal(&literal.text) {
        Some(value) if value > 0 => u32::try_from(value).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Builds the declared type from the element kind and bracket literals.
pub fn declared_type(
    basic_type: BasicType,
    dims: &[DimLiteral],
    unsized_first_dim: bool,
    node: NodeId,
) -> Result<Type, Error> {
    let mut ty = Type::scalar(basic_type);

    if unsized_first_dim {
        ty.add_dim(0);
    }
    for literal in dims {
        ty.add_dim(dimension(literal, node)?);
    }

    Ok(ty)
}

pub fn check_decl(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    decl: &mut Decl,
) -> Result<(), Error> {
    for def in decl.defs.iter_mut() {
        check_var_def(type_checker, ctx, decl.is_constant, decl.basic_type, def)?;
    }

    Ok(())
}

fn check_var_def(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    is_constant: bool,
    basic_type: BasicType,
    def: &mut VarDef,
) -> Result<(), Error> {
    let ty = declared_type(basic_type, &def.dims, false, def.id)?;

    let mut symbol = if is_constant {
        Symbol::constant(def.name.clone(), ty.clone())
    } else {
        Symbol::variable(def.name.clone(), ty.clone())
    };

    if let Some(init) = def.init.as_mut() {
        check_initializer(type_checker, ctx, init, &ty, 0)?;
        symbol.is_initialized = true;
    }

    let id = type_checker
        .registry
        .register_variable(ctx.current_scope, &def.name, symbol)
        .map_err(|error| Error::at_node(error, def.id, &def.span))?;
    def.symbol = Some(id);

    tracing::debug!(name = %def.name, %ty, constant = is_constant, "declared");
    Ok(())
}

fn check_func_param(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    function: FunctionId,
    param: &mut FuncParam,
) -> Result<(), Error> {
    let ty = declared_type(param.basic_type, &param.dims, param.unsized_first_dim, param.id)?;

    type_checker.registry.add_parameter(
        function,
        Parameter {
            name: param.name.clone(),
            ty: ty.clone(),
        },
    );

    let id = type_checker
        .registry
        .register_variable(ctx.current_scope, &param.name, Symbol::parameter(param.name.clone(), ty))
        .map_err(|error| Error::at_node(error, param.id, &param.span))?;
    param.symbol = Some(id);

    Ok(())
}

pub fn check_func_def(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    func: &mut FuncDef,
) -> Result<(), Error> {
    let (scope, function) = type_checker.in_scope(ctx, |type_checker, ctx| {
        let function = type_checker
            .registry
            .new_function(&func.name, func.return_type)
            .map_err(|error| Error::at_node(error, func.id, &func.span))?;
        func.function = Some(function);

        type_checker.in_function(ctx, function, |type_checker, ctx| {
            for param in func.params.iter_mut() {
                check_func_param(type_checker, ctx, function, param)?;
            }

            check_block(type_checker, ctx, &mut func.body)
        })?;

        Ok(function)
    })?;
    func.scope = Some(scope);

    tracing::debug!(
        name = %func.name,
        function = function.0,
        returns = func.body.has_return,
        "checked function"
    );
    Ok(())
}

fn check_comp_unit(
    type_checker: &mut TypeChecker,
    ctx: &mut CheckingContext,
    ast: &mut CompUnit,
) -> Result<(), Error> {
    for item in ast.items.iter_mut() {
        match item {
            Item::Decl(decl) => check_decl(type_checker, ctx, decl)?,
            Item::FuncDef(func) => check_func_def(type_checker, ctx, func)?,
        }
    }

    Ok(())
}

/// Checks a whole translation unit, annotating `ast` in place.
///
/// Stops at the first semantic error. The returned checker owns the
/// registry that the annotation handles point into.
#[tracing::instrument(skip_all, fields(items = ast.items.len()))]
pub fn type_check(ast: &mut CompUnit, options: &TypeCheckOptions) -> (TypeChecker, Option<Error>) {
    let mut type_checker = TypeChecker::new();
    let global = type_checker.registry.create_global_scope();

    if options.register_builtins {
        if let Err(error) = type_checker.registry.register_builtins() {
            return (type_checker, Some(Error::at_node(error, ast.id, &ast.span)));
        }
    }

    let mut ctx = CheckingContext::new(global);
    let result = check_comp_unit(&mut type_checker, &mut ctx, ast);

    match result {
        Ok(()) => (type_checker, None),
        Err(error) => {
            tracing::debug!(error = error.get_error_name(), node = ?error.get_node(), "type check failed");
            (type_checker, Some(error))
        }
    }
}
