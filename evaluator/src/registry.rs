//! Operator registry — behavioral half. Maps each closed-set operator name
//! to its compile-time constancy flags and its compile function: given the
//! already-compiled children (plus the raw argument expressions, for the
//! handful of operators that need a compile-time constant), build the
//! [`Thunk`] that runs at evaluation time.
//!
//! `get`/`has` take their object argument explicitly (spec.md §4.4:
//! `get(Object, String) -> Value`), so their feature-dependence is not a
//! static property of the operator itself — it falls out of whichever
//! expression produces that object (typically `properties`), the same as
//! every other operator with no constancy override.

use crate::color;
use crate::compile::{literal_number, Thunk};
use crate::context::EvalContext;
use crate::curve::{self, Interpolation};
use crate::error::{CompileError, RuntimeError};
use crate::value::Value;
use analyzer::{Expr, Ty};
use std::collections::HashMap;
use std::sync::LazyLock;

pub(crate) struct CallCtx<'a> {
    pub key: &'a str,
    pub args: &'a [Expr],
    pub compiled: Vec<Thunk>,
    pub result_ty: &'a Ty,
}

type CompileFn = Box<dyn Fn(CallCtx) -> Result<Thunk, CompileError> + Send + Sync>;

pub(crate) struct OperatorEntry {
    pub feature_dependent: bool,
    pub zoom_dependent: bool,
    pub compile: CompileFn,
}

static REGISTRY: LazyLock<HashMap<&'static str, OperatorEntry>> = LazyLock::new(build_registry);

pub(crate) fn lookup(name: &str) -> Option<&'static OperatorEntry> {
    REGISTRY.get(name)
}

fn entry(feature_dependent: bool, zoom_dependent: bool, compile: CompileFn) -> OperatorEntry {
    OperatorEntry {
        feature_dependent,
        zoom_dependent,
        compile,
    }
}

fn plain(compile: CompileFn) -> OperatorEntry {
    entry(false, false, compile)
}

fn build_registry() -> HashMap<&'static str, OperatorEntry> {
    let mut map = HashMap::new();
    let mut add = |name: &'static str, op: OperatorEntry| {
        map.insert(name, op);
    };

    // --- literal / constants --------------------------------------------
    add(
        "literal",
        plain(Box::new(|mut ctx: CallCtx| Ok(ctx.compiled.remove(0)))),
    );
    add("ln2", plain(constant_number(std::f64::consts::LN_2)));
    add("pi", plain(constant_number(std::f64::consts::PI)));
    add("e", plain(constant_number(std::f64::consts::E)));

    // --- coercions --------------------------------------------------------
    add("string", plain(coerce("string", coerce_string)));
    add("number", plain(coerce("number", coerce_number)));
    add("boolean", plain(coerce("boolean", coerce_boolean)));
    add("json_array", plain(coerce("array", coerce_json_array)));
    add("object", plain(coerce("object", coerce_object)));

    // --- container / reflection --------------------------------------------
    add("get", plain(Box::new(compile_get)));
    add("has", plain(Box::new(compile_has)));
    add("at", plain(Box::new(compile_at)));
    add(
        "typeof",
        plain(unary(|v| Ok(Value::String(v.type_name().to_string())))),
    );
    add("length", plain(unary(compile_length)));

    // --- feature / zoom data -----------------------------------------------
    add(
        "zoom",
        entry(
            false,
            true,
            Box::new(|_ctx| Ok(Box::new(|ectx: &EvalContext| Ok(Value::Number(ectx.map_properties.zoom))))),
        ),
    );
    add(
        "properties",
        entry(
            true,
            false,
            Box::new(|_ctx| {
                Ok(Box::new(|ectx: &EvalContext| {
                    Ok(Value::Object(ectx.feature.properties.clone()))
                }))
            }),
        ),
    );
    add(
        "geometry_type",
        entry(
            true,
            false,
            Box::new(|_ctx| {
                Ok(Box::new(|ectx: &EvalContext| {
                    Ok(Value::String(ectx.feature.geometry_type.clone()))
                }))
            }),
        ),
    );
    add(
        "id",
        entry(
            true,
            false,
            Box::new(|_ctx| Ok(Box::new(|ectx: &EvalContext| Ok(ectx.feature.id.clone())))),
        ),
    );

    // --- arithmetic ---------------------------------------------------------
    add("+", plain(variadic_numeric(|a, b| a + b)));
    add("*", plain(variadic_numeric(|a, b| a * b)));
    add("-", plain(variadic_numeric(|a, b| a - b)));
    // Division/modulo by zero are not in spec.md §7's evaluation-time error
    // list; they fall through to ordinary IEEE-754 semantics (inf/NaN).
    add("/", plain(variadic_numeric(|a, b| a / b)));
    add("%", plain(variadic_numeric(|a, b| a % b)));
    add("^", plain(binary_numeric(|a, b| Ok(a.powf(b)))));

    // --- math ---------------------------------------------------------------
    add("ln", plain(unary_math(f64::ln)));
    add("log2", plain(unary_math(f64::log2)));
    add("log10", plain(unary_math(f64::log10)));
    add("sin", plain(unary_math(f64::sin)));
    add("cos", plain(unary_math(f64::cos)));
    add("tan", plain(unary_math(f64::tan)));
    add("asin", plain(unary_math(f64::asin)));
    add("acos", plain(unary_math(f64::acos)));
    add("atan", plain(unary_math(f64::atan)));

    // --- comparison -----------------------------------------------------------
    add("==", plain(equality(|eq| eq)));
    add("!=", plain(equality(|eq| !eq)));
    add(">", plain(ordering(|o| o == std::cmp::Ordering::Greater)));
    add("<", plain(ordering(|o| o == std::cmp::Ordering::Less)));
    add(
        ">=",
        plain(ordering(|o| o != std::cmp::Ordering::Less)),
    );
    add(
        "<=",
        plain(ordering(|o| o != std::cmp::Ordering::Greater)),
    );

    // --- boolean --------------------------------------------------------------
    add("&&", plain(variadic_bool(true)));
    add("||", plain(variadic_bool(false)));
    add("!", plain(unary(|v| {
        v.as_bool()
            .map(|b| Value::Boolean(!b))
            .ok_or_else(|| RuntimeError::coercion_failed("boolean"))
    })));

    // --- strings --------------------------------------------------------------
    add("concat", plain(Box::new(compile_concat)));
    add(
        "upcase",
        plain(unary(|v| string_op(v, str::to_uppercase))),
    );
    add(
        "downcase",
        plain(unary(|v| string_op(v, str::to_lowercase))),
    );

    // --- color ------------------------------------------------------------------
    add("rgb", plain(Box::new(compile_rgb)));
    add("rgba", plain(Box::new(compile_rgba)));
    add(
        "color",
        plain(unary(|v| {
            let s = v
                .as_str()
                .ok_or_else(|| RuntimeError::coercion_failed("string"))?;
            color::parse(s).map(Value::Color)
        })),
    );
    add(
        "color_to_array",
        plain(unary(|v| {
            v.as_color()
                .map(|c| Value::Array(c.iter().map(|x| Value::Number(*x)).collect()))
                .ok_or_else(|| RuntimeError::coercion_failed("color"))
        })),
    );

    // --- control / curve ----------------------------------------------------------
    add("case", plain(Box::new(compile_case)));
    add("step", plain(interpolation_marker()));
    add("linear", plain(interpolation_marker()));
    add("exponential", plain(interpolation_marker()));
    add("curve", plain(Box::new(compile_curve)));

    map
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn constant_number(n: f64) -> CompileFn {
    Box::new(move |_ctx| Ok(Box::new(move |_ectx: &EvalContext| Ok(Value::Number(n)))))
}

fn unary(f: impl Fn(&Value) -> Result<Value, RuntimeError> + Send + Sync + 'static) -> CompileFn {
    Box::new(move |mut ctx: CallCtx| {
        let a = ctx.compiled.remove(0);
        let f = std::sync::Arc::new(f);
        Ok(Box::new(move |ectx: &EvalContext| {
            let v = a(ectx)?;
            f(&v)
        }))
    })
}

fn unary_math(op: fn(f64) -> f64) -> CompileFn {
    unary(move |v| {
        v.as_number()
            .map(|n| Value::Number(op(n)))
            .ok_or_else(|| RuntimeError::coercion_failed("number"))
    })
}

fn binary_numeric(op: impl Fn(f64, f64) -> Result<f64, RuntimeError> + Send + Sync + 'static) -> CompileFn {
    Box::new(move |mut ctx: CallCtx| {
        let a = ctx.compiled.remove(0);
        let b = ctx.compiled.remove(0);
        let op = std::sync::Arc::new(op);
        Ok(Box::new(move |ectx: &EvalContext| {
            let x = a(ectx)?
                .as_number()
                .ok_or_else(|| RuntimeError::coercion_failed("number"))?;
            let y = b(ectx)?
                .as_number()
                .ok_or_else(|| RuntimeError::coercion_failed("number"))?;
            Ok(Value::Number(op(x, y)?))
        }))
    })
}

fn ordering(accept: fn(std::cmp::Ordering) -> bool) -> CompileFn {
    Box::new(move |mut ctx: CallCtx| {
        let a = ctx.compiled.remove(0);
        let b = ctx.compiled.remove(0);
        Ok(Box::new(move |ectx: &EvalContext| {
            let x = a(ectx)?;
            let y = b(ectx)?;
            Ok(Value::Boolean(accept(compare_values(&x, &y)?)))
        }))
    })
}

/// Ordering for the generic `>`/`<`/`>=`/`<=` operators (spec.md §4.4: generic
/// in `T` over two args). Only `Number` and `String` have a natural order.
fn compare_values(a: &Value, b: &Value) -> Result<std::cmp::Ordering, RuntimeError> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .partial_cmp(y)
            .ok_or_else(|| RuntimeError::coercion_failed("orderable number")),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => Err(RuntimeError::coercion_failed("Number or String")),
    }
}

fn variadic_numeric(combine: fn(f64, f64) -> f64) -> CompileFn {
    Box::new(move |ctx: CallCtx| {
        let thunks = ctx.compiled;
        Ok(Box::new(move |ectx: &EvalContext| {
            let mut iter = thunks.iter();
            let first = iter
                .next()
                .expect("variadic numeric op always has at least 2 args")(ectx)?
            .as_number()
            .ok_or_else(|| RuntimeError::coercion_failed("number"))?;
            let mut acc = first;
            for t in iter {
                let n = t(ectx)?
                    .as_number()
                    .ok_or_else(|| RuntimeError::coercion_failed("number"))?;
                acc = combine(acc, n);
            }
            Ok(Value::Number(acc))
        }))
    })
}

fn variadic_bool(short_circuit_on: bool) -> CompileFn {
    Box::new(move |ctx: CallCtx| {
        let thunks = ctx.compiled;
        Ok(Box::new(move |ectx: &EvalContext| {
            for t in &thunks {
                let b = t(ectx)?
                    .as_bool()
                    .ok_or_else(|| RuntimeError::coercion_failed("boolean"))?;
                if b == short_circuit_on {
                    return Ok(Value::Boolean(short_circuit_on));
                }
            }
            Ok(Value::Boolean(!short_circuit_on))
        }))
    })
}

fn equality(transform: fn(bool) -> bool) -> CompileFn {
    Box::new(move |mut ctx: CallCtx| {
        let a = ctx.compiled.remove(0);
        let b = ctx.compiled.remove(0);
        Ok(Box::new(move |ectx: &EvalContext| {
            let x = a(ectx)?;
            let y = b(ectx)?;
            Ok(Value::Boolean(transform(x == y)))
        }))
    })
}

fn string_op(v: &Value, f: impl Fn(&str) -> String) -> Result<Value, RuntimeError> {
    v.as_str()
        .map(|s| Value::String(f(s)))
        .ok_or_else(|| RuntimeError::coercion_failed("string"))
}

fn interpolation_marker() -> CompileFn {
    // `step`/`linear`/`exponential` are read directly off the raw `Expr` by
    // `curve`'s own compile step (see `compile_curve`); this thunk is never
    // actually invoked, but every registered operator needs one.
    Box::new(|_ctx| Ok(Box::new(|_ectx: &EvalContext| Ok(Value::Null))))
}

// ---------------------------------------------------------------------------
// Coercions
// ---------------------------------------------------------------------------

fn coerce(
    target: &'static str,
    f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static,
) -> CompileFn {
    Box::new(move |ctx: CallCtx| {
        let thunks = ctx.compiled;
        Ok(Box::new(move |ectx: &EvalContext| {
            for t in &thunks {
                let v = t(ectx)?;
                if let Some(out) = f(&v) {
                    return Ok(out);
                }
            }
            Err(RuntimeError::coercion_failed(target))
        }))
    })
}

fn coerce_string(v: &Value) -> Option<Value> {
    match v {
        Value::String(_) => Some(v.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Boolean(b) => Some(Value::String(b.to_string())),
        Value::Null => Some(Value::String("null".to_string())),
        _ => None,
    }
}

fn coerce_number(v: &Value) -> Option<Value> {
    match v {
        Value::Number(_) => Some(v.clone()),
        Value::String(s) => s.parse::<f64>().ok().map(Value::Number),
        Value::Boolean(b) => Some(Value::Number(if *b { 1.0 } else { 0.0 })),
        _ => None,
    }
}

fn coerce_boolean(v: &Value) -> Option<Value> {
    match v {
        Value::Boolean(_) => Some(v.clone()),
        Value::Number(n) => Some(Value::Boolean(*n != 0.0)),
        Value::String(s) => Some(Value::Boolean(!s.is_empty())),
        Value::Null => Some(Value::Boolean(false)),
        _ => None,
    }
}

fn coerce_json_array(v: &Value) -> Option<Value> {
    match v {
        Value::Array(_) => Some(v.clone()),
        _ => None,
    }
}

fn coerce_object(v: &Value) -> Option<Value> {
    match v {
        Value::Object(_) => Some(v.clone()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Container / reflection
// ---------------------------------------------------------------------------

fn compile_get(mut ctx: CallCtx) -> Result<Thunk, CompileError> {
    let object_thunk = ctx.compiled.remove(0);
    let key_thunk = ctx.compiled.remove(0);
    Ok(Box::new(move |ectx: &EvalContext| {
        let object = object_thunk(ectx)?;
        let key = key_thunk(ectx)?;
        let key = key
            .as_str()
            .ok_or_else(|| RuntimeError::coercion_failed("string"))?;
        match object {
            Value::Object(map) => map.get(key).map(Value::from_json).ok_or_else(|| {
                RuntimeError::missing_property(key, &map.keys().cloned().collect::<Vec<_>>())
            }),
            _ => Err(RuntimeError::coercion_failed("object")),
        }
    }))
}

fn compile_has(mut ctx: CallCtx) -> Result<Thunk, CompileError> {
    let object_thunk = ctx.compiled.remove(0);
    let key_thunk = ctx.compiled.remove(0);
    Ok(Box::new(move |ectx: &EvalContext| {
        let object = object_thunk(ectx)?;
        let key = key_thunk(ectx)?;
        let key = key
            .as_str()
            .ok_or_else(|| RuntimeError::coercion_failed("string"))?;
        match object {
            Value::Object(map) => Ok(Value::Boolean(map.contains_key(key))),
            _ => Err(RuntimeError::coercion_failed("object")),
        }
    }))
}

fn compile_at(mut ctx: CallCtx) -> Result<Thunk, CompileError> {
    let array_thunk = ctx.compiled.remove(0);
    let index_thunk = ctx.compiled.remove(0);
    Ok(Box::new(move |ectx: &EvalContext| {
        let array = array_thunk(ectx)?;
        let index = index_thunk(ectx)?
            .as_number()
            .ok_or_else(|| RuntimeError::coercion_failed("number"))?;
        let items = array
            .as_array()
            .ok_or_else(|| RuntimeError::coercion_failed("array"))?;
        let idx = index as usize;
        if index < 0.0 || idx >= items.len() {
            return Err(RuntimeError::index_out_of_bounds(index, items.len()));
        }
        Ok(items[idx].clone())
    }))
}

fn compile_length(v: &Value) -> Result<Value, RuntimeError> {
    match v {
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::Array(items) => Ok(Value::Number(items.len() as f64)),
        _ => Err(RuntimeError::coercion_failed("string or array")),
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

fn compile_concat(ctx: CallCtx) -> Result<Thunk, CompileError> {
    let thunks = ctx.compiled;
    Ok(Box::new(move |ectx: &EvalContext| {
        let mut out = String::new();
        for t in &thunks {
            let v = t(ectx)?;
            out.push_str(&default_string_form(&v)?);
        }
        Ok(Value::String(out))
    }))
}

/// `concat`'s default string form (spec.md §4.4): `null` -> `""`, numbers via
/// default decimal formatting, booleans `"true"`/`"false"`, strings as-is.
fn default_string_form(v: &Value) -> Result<String, RuntimeError> {
    match v {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        _ => Err(RuntimeError::coercion_failed("string")),
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

fn compile_rgb(ctx: CallCtx) -> Result<Thunk, CompileError> {
    let mut thunks = ctx.compiled.into_iter();
    let (r, g, b) = (
        thunks.next().unwrap(),
        thunks.next().unwrap(),
        thunks.next().unwrap(),
    );
    Ok(Box::new(move |ectx: &EvalContext| {
        let channel = |t: &Thunk| -> Result<f64, RuntimeError> {
            t(ectx)?
                .as_number()
                .ok_or_else(|| RuntimeError::coercion_failed("number"))
        };
        Ok(Value::Color([channel(&r)? / 255.0, channel(&g)? / 255.0, channel(&b)? / 255.0, 1.0]))
    }))
}

fn compile_rgba(ctx: CallCtx) -> Result<Thunk, CompileError> {
    let mut thunks = ctx.compiled.into_iter();
    let r = thunks.next().unwrap();
    let g = thunks.next().unwrap();
    let b = thunks.next().unwrap();
    let alpha = thunks.next();
    Ok(Box::new(move |ectx: &EvalContext| {
        let channel = |t: &Thunk| -> Result<f64, RuntimeError> {
            t(ectx)?
                .as_number()
                .ok_or_else(|| RuntimeError::coercion_failed("number"))
        };
        let a = match &alpha {
            Some(t) => channel(t)?,
            None => 1.0,
        };
        Ok(Value::Color([
            channel(&r)? / 255.0,
            channel(&g)? / 255.0,
            channel(&b)? / 255.0,
            a,
        ]))
    }))
}

// ---------------------------------------------------------------------------
// Control flow
// ---------------------------------------------------------------------------

fn compile_case(ctx: CallCtx) -> Result<Thunk, CompileError> {
    let mut thunks = ctx.compiled.into_iter();
    let mut pairs = Vec::new();
    while thunks.len() > 1 {
        let test = thunks.next().unwrap();
        let output = thunks.next().unwrap();
        pairs.push((test, output));
    }
    let fallback = thunks.next().ok_or_else(|| {
        CompileError::new(ctx.key, "case requires a fallback output after its test/output pairs.")
    })?;
    Ok(Box::new(move |ectx: &EvalContext| {
        for (test, output) in &pairs {
            let t = test(ectx)?
                .as_bool()
                .ok_or_else(|| RuntimeError::coercion_failed("boolean"))?;
            if t {
                return output(ectx);
            }
        }
        fallback(ectx)
    }))
}

// ---------------------------------------------------------------------------
// Curve
// ---------------------------------------------------------------------------

fn compile_curve(ctx: CallCtx) -> Result<Thunk, CompileError> {
    match ctx.result_ty {
        Ty::Number | Ty::Color => {}
        other => {
            return Err(CompileError::new(
                ctx.key,
                format!("curve's result must be Number or Color, but was inferred as {}.", other.name()),
            ));
        }
    }

    let interp_expr = ctx.args.first().ok_or_else(|| {
        CompileError::new(ctx.key, "curve requires an interpolation type as its first argument.")
    })?;
    let Expr::Call {
        name: interp_name,
        args: interp_args,
        ..
    } = interp_expr
    else {
        return Err(CompileError::new(
            ctx.key,
            "curve's first argument must be step, linear, or exponential.",
        ));
    };
    let kind = match interp_name.as_str() {
        "step" => Interpolation::Step,
        "linear" => Interpolation::Linear,
        "exponential" => {
            let base = interp_args
                .first()
                .and_then(literal_number)
                .ok_or_else(|| {
                    CompileError::new(ctx.key, "exponential's base must be a literal number.")
                })?;
            Interpolation::Exponential(base)
        }
        other => {
            return Err(CompileError::new(
                ctx.key,
                format!("curve's first argument must be step, linear, or exponential, found \"{other}\"."),
            ));
        }
    };

    let mut compiled: Vec<Option<Thunk>> = ctx.compiled.into_iter().map(Some).collect();
    let input_thunk = compiled[1].take().expect("curve input thunk");

    let mut stop_keys = Vec::new();
    let mut stop_thunks = Vec::new();
    let mut i = 2;
    while i < ctx.args.len() {
        let stop_key = literal_number(&ctx.args[i]).ok_or_else(|| {
            CompileError::new(ctx.key, "curve stop keys must be literal numbers.")
        })?;
        if let Some(&prev) = stop_keys.last() {
            if stop_key <= prev {
                return Err(CompileError::new(
                    ctx.key,
                    "curve stops must be strictly increasing.",
                ));
            }
        }
        stop_keys.push(stop_key);
        stop_thunks.push(compiled[i + 1].take().expect("curve stop value thunk"));
        i += 2;
    }
    if stop_keys.is_empty() {
        return Err(CompileError::new(ctx.key, "curve requires at least one stop."));
    }

    Ok(Box::new(move |ectx: &EvalContext| {
        let input = input_thunk(ectx)?
            .as_number()
            .ok_or_else(|| RuntimeError::coercion_failed("number"))?;
        let (lo, hi) = curve::bracket(&stop_keys, input);
        if lo == hi || kind == Interpolation::Step {
            return stop_thunks[lo](ectx);
        }
        let a = stop_thunks[lo](ectx)?;
        let b = stop_thunks[hi](ectx)?;
        let t = curve::factor(kind, input, stop_keys[lo], stop_keys[hi]);
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => Ok(Value::Number(color::lerp_number(x, y, t))),
            (Value::Color(x), Value::Color(y)) => Ok(Value::Color(color::lerp_color(x, y, t))),
            _ => Err(RuntimeError::new("curve stop values must all be Number or all Color.")),
        }
    }))
}
