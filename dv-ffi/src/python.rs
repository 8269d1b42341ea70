//! `dv` Python extension module.
//!
//! Wraps [`DimensionalVariable`] in a frozen pyclass with arithmetic and
//! comparison operators. Plain Python numbers mixed into arithmetic are
//! treated as unitless variables. Every engine error is raised as a subclass
//! of `dv.DVError` named after its kind.

use dv_core::{DimensionalVariable, DvError, DvResult, ErrorKind};
use pyo3::basic::CompareOp;
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::PyTuple;
use pyo3::IntoPyObjectExt;

create_exception!(dv, DVError, PyException, "Base class of every dv error.");
create_exception!(dv, InvalidUnitSyntaxError, DVError, "Malformed unit string.");
create_exception!(dv, UnknownUnitSymbolError, DVError, "Unit symbol not in the registry.");
create_exception!(dv, DimensionMismatchError, DVError, "Operands have different dimensions.");
create_exception!(dv, RequiresUnitlessError, DVError, "Operation needs a unitless operand.");
create_exception!(
    dv,
    RequiresAngleOrUnitlessError,
    DVError,
    "Operation needs an angle or unitless operand."
);
create_exception!(dv, DomainError, DVError, "Value outside the operation's domain.");
create_exception!(
    dv,
    NonIntegralDimensionError,
    DVError,
    "Power would leave fractional dimension exponents."
);
create_exception!(
    dv,
    ExponentOverflowError,
    DVError,
    "Dimension exponent outside the representable range."
);

fn to_py_err(err: DvError) -> PyErr {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::InvalidUnitSyntax => InvalidUnitSyntaxError::new_err(message),
        ErrorKind::UnknownUnitSymbol => UnknownUnitSymbolError::new_err(message),
        ErrorKind::DimensionMismatch => DimensionMismatchError::new_err(message),
        ErrorKind::RequiresUnitless => RequiresUnitlessError::new_err(message),
        ErrorKind::RequiresAngleOrUnitless => RequiresAngleOrUnitlessError::new_err(message),
        ErrorKind::DomainError => DomainError::new_err(message),
        ErrorKind::NonIntegralDimension => NonIntegralDimensionError::new_err(message),
        ErrorKind::ExponentOverflow => ExponentOverflowError::new_err(message),
    }
}

fn wrap(result: DvResult<DimensionalVariable>) -> PyResult<PyDimensionalVariable> {
    result.map(PyDimensionalVariable::from).map_err(to_py_err)
}

/// Another `DimensionalVariable`, or a real number taken as unitless.
fn try_operand(obj: &Bound<'_, PyAny>) -> Option<DimensionalVariable> {
    if let Ok(v) = obj.extract::<PyRef<'_, PyDimensionalVariable>>() {
        return Some(v.inner.clone());
    }
    obj.extract::<f64>().ok().map(DimensionalVariable::unitless)
}

fn operand(obj: &Bound<'_, PyAny>) -> PyResult<DimensionalVariable> {
    try_operand(obj).ok_or_else(|| {
        PyTypeError::new_err(format!(
            "unsupported operand type for DimensionalVariable: {}",
            obj.get_type()
        ))
    })
}

#[pyclass(name = "DimensionalVariable", module = "dv", frozen)]
#[derive(Clone)]
struct PyDimensionalVariable {
    inner: DimensionalVariable,
}

impl From<DimensionalVariable> for PyDimensionalVariable {
    fn from(inner: DimensionalVariable) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyDimensionalVariable {
    /// DimensionalVariable(value, unit="")
    ///
    /// Builds a variable from `value` expressed in `unit`.
    #[new]
    #[pyo3(signature = (value, unit = ""))]
    fn new(value: f64, unit: &str) -> PyResult<Self> {
        wrap(DimensionalVariable::new(value, unit))
    }

    /// Magnitude in SI base units.
    fn value(&self) -> f64 {
        self.inner.value()
    }

    /// Magnitude expressed in `unit`.
    fn value_in(&self, unit: &str) -> PyResult<f64> {
        self.inner.value_in(unit).map_err(to_py_err)
    }

    fn is_unitless(&self) -> bool {
        self.inner.is_unitless()
    }

    /// Exponents of (m, kg, s, K, A, mol, cd, rad) as floats.
    fn base_units<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyTuple>> {
        PyTuple::new(py, self.inner.dimension().exponents_f64())
    }

    fn powi(&self, n: i64) -> PyResult<Self> {
        wrap(self.inner.powi(n))
    }

    fn powf(&self, exponent: f64) -> PyResult<Self> {
        wrap(self.inner.powf(exponent))
    }

    fn sqrt(&self) -> PyResult<Self> {
        wrap(self.inner.sqrt())
    }

    fn ln(&self) -> PyResult<Self> {
        wrap(self.inner.ln())
    }

    fn log2(&self) -> PyResult<Self> {
        wrap(self.inner.log2())
    }

    fn log10(&self) -> PyResult<Self> {
        wrap(self.inner.log10())
    }

    fn sin(&self) -> PyResult<Self> {
        wrap(self.inner.sin())
    }

    fn cos(&self) -> PyResult<Self> {
        wrap(self.inner.cos())
    }

    fn tan(&self) -> PyResult<Self> {
        wrap(self.inner.tan())
    }

    fn asin(&self) -> PyResult<Self> {
        wrap(self.inner.asin())
    }

    fn acos(&self) -> PyResult<Self> {
        wrap(self.inner.acos())
    }

    fn atan(&self) -> PyResult<Self> {
        wrap(self.inner.atan())
    }

    fn __add__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(self.inner.try_add(&operand(other)?))
    }

    fn __radd__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(operand(other)?.try_add(&self.inner))
    }

    fn __sub__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(self.inner.try_sub(&operand(other)?))
    }

    fn __rsub__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(operand(other)?.try_sub(&self.inner))
    }

    fn __mul__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(&self.inner * &operand(other)?)
    }

    fn __rmul__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(&operand(other)? * &self.inner)
    }

    fn __truediv__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(&self.inner / &operand(other)?)
    }

    fn __rtruediv__(&self, other: &Bound<'_, PyAny>) -> PyResult<Self> {
        wrap(&operand(other)? / &self.inner)
    }

    fn __pow__(
        &self,
        exponent: &Bound<'_, PyAny>,
        modulo: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        if modulo.is_some() {
            return Err(PyTypeError::new_err(
                "pow() with a modulus is not supported for DimensionalVariable",
            ));
        }
        if let Ok(n) = exponent.extract::<i64>() {
            return wrap(self.inner.powi(n));
        }
        let e = exponent
            .extract::<f64>()
            .map_err(|_| PyTypeError::new_err("exponent must be a real number"))?;
        wrap(self.inner.powf(e))
    }

    fn __neg__(&self) -> Self {
        (-&self.inner).into()
    }

    fn __abs__(&self) -> Self {
        self.inner.abs().into()
    }

    /// Foreign operand types yield `NotImplemented`; mismatched dimensions raise.
    fn __richcmp__(&self, other: &Bound<'_, PyAny>, op: CompareOp) -> PyResult<Py<PyAny>> {
        let py = other.py();
        let Some(other) = try_operand(other) else {
            return Ok(py.NotImplemented());
        };
        let result = match op {
            CompareOp::Lt => self.inner.less_than(&other),
            CompareOp::Le => self.inner.less_equal(&other),
            CompareOp::Eq => self.inner.equals(&other),
            CompareOp::Ne => self.inner.not_equals(&other),
            CompareOp::Gt => self.inner.greater_than(&other),
            CompareOp::Ge => self.inner.greater_equal(&other),
        };
        result.map_err(to_py_err)?.into_py_any(py)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "DimensionalVariable({:?}, {:?})",
            self.inner.value(),
            self.inner.dimension().unit_string()
        )
    }
}

/// Arcsine of a plain number, as an angle.
#[pyfunction]
fn asin(x: f64) -> PyResult<PyDimensionalVariable> {
    wrap(dv_core::asin_scalar(x))
}

/// Arccosine of a plain number, as an angle.
#[pyfunction]
fn acos(x: f64) -> PyResult<PyDimensionalVariable> {
    wrap(dv_core::acos_scalar(x))
}

/// Arctangent of a plain number, as an angle.
#[pyfunction]
fn atan(x: f64) -> PyResult<PyDimensionalVariable> {
    wrap(dv_core::atan_scalar(x))
}

#[pyfunction]
fn version() -> &'static str {
    dv_core::version()
}

#[pymodule]
#[pyo3(name = "dv")]
fn dv_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    m.add_class::<PyDimensionalVariable>()?;
    m.add_function(wrap_pyfunction!(asin, m)?)?;
    m.add_function(wrap_pyfunction!(acos, m)?)?;
    m.add_function(wrap_pyfunction!(atan, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;

    m.add("DVError", py.get_type::<DVError>())?;
    m.add("InvalidUnitSyntaxError", py.get_type::<InvalidUnitSyntaxError>())?;
    m.add("UnknownUnitSymbolError", py.get_type::<UnknownUnitSymbolError>())?;
    m.add("DimensionMismatchError", py.get_type::<DimensionMismatchError>())?;
    m.add("RequiresUnitlessError", py.get_type::<RequiresUnitlessError>())?;
    m.add(
        "RequiresAngleOrUnitlessError",
        py.get_type::<RequiresAngleOrUnitlessError>(),
    )?;
    m.add("DomainError", py.get_type::<DomainError>())?;
    m.add("NonIntegralDimensionError", py.get_type::<NonIntegralDimensionError>())?;
    m.add("ExponentOverflowError", py.get_type::<ExponentOverflowError>())?;

    m.add("__version__", dv_core::version())?;
    Ok(())
}
